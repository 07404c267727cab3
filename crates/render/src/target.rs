// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Rendering a `select=` projection list.

use sql_to_postgrest_ir::Target;

/// Render a full `Select.targets` list as the comma-joined value of a
/// `select=` parameter. Callers are expected to have already checked
/// [`Target::is_canonical_wildcard`] and skipped emitting the parameter
/// entirely when it's the bare `*` marker.
pub fn render_targets(targets: &[Target]) -> String {
    targets.iter().map(render_target).collect::<Vec<_>>().join(",")
}

fn render_target(target: &Target) -> String {
    match target {
        Target::ColumnTarget { column, alias, cast } => {
            format!("{}{}{}", alias_prefix(alias), column, cast_suffix(cast))
        }
        Target::ResourceTarget { relation, children } => {
            format!("{relation}({})", render_targets(children))
        }
        Target::AggregateTarget {
            function,
            column,
            alias,
            cast,
        } => {
            let call = match column {
                Some(column) => format!("{column}.{}()", function.as_str()),
                None => format!("{}()", function.as_str()),
            };
            format!("{}{call}{}", alias_prefix(alias), cast_suffix(cast))
        }
    }
}

fn alias_prefix(alias: &Option<String>) -> String {
    match alias {
        Some(alias) => format!("{alias}:"),
        None => String::new(),
    }
}

fn cast_suffix(cast: &Option<String>) -> String {
    match cast {
        Some(cast) => format!("::{cast}"),
        None => String::new(),
    }
}
