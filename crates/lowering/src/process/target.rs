// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Lowering one projection-list expression into a `Target`.
//!
//! A plain `ColumnRef` becomes a `ColumnTarget`; a `FuncCall` whose name is
//! one of the five supported aggregates becomes an `AggregateTarget`; any
//! other `FuncCall` is read as the embedded-relation shorthand
//! (`authors(name, bio)` parses, syntactically, as a call to a function
//! named `authors`) and becomes a `ResourceTarget` with its arguments
//! lowered recursively as children. A `TypeCast` wraps whichever of those
//! three shapes it casts and attaches the cast to it.

use crate::error::{PipelineError, PipelineResult};
use crate::process::column_ref;
use pg_query::protobuf::{Node, TypeName};
use pg_query::NodeEnum;
use sql_to_postgrest_ir::{AggregateFunction, Target};

pub fn lower_target_expr(node: &Node, alias: Option<String>) -> PipelineResult<Target> {
    match node.node.as_ref() {
        Some(NodeEnum::ColumnRef(c)) => {
            let column = if column_ref::is_wildcard(c) {
                column_ref::wildcard_name(c)
            } else {
                column_ref::qualified_name(c)?
            };
            Ok(Target::ColumnTarget {
                column,
                alias,
                cast: None,
            })
        }
        Some(NodeEnum::TypeCast(cast)) => {
            let inner = cast
                .arg
                .as_deref()
                .ok_or_else(|| PipelineError::unsupported("cast with no argument"))?;
            let cast_name = type_name_to_string(cast.type_name.as_ref())?;
            attach_cast(lower_target_expr(inner, alias)?, cast_name)
        }
        Some(NodeEnum::FuncCall(call)) => {
            let name = last_func_name(&call.funcname)?;
            if let Some(function) = AggregateFunction::from_sql_name(&name) {
                if call.args.len() > 1 {
                    return Err(PipelineError::unsupported(
                        "aggregate functions accept at most one argument in the supported subset",
                    ));
                }
                let column = if call.agg_star {
                    None
                } else if let Some(arg) = call.args.first() {
                    Some(column_ref::qualified_name(column_ref::as_column_ref(arg)?)?)
                } else {
                    None
                };
                Ok(Target::AggregateTarget {
                    function,
                    column,
                    alias,
                    cast: None,
                })
            } else {
                if alias.is_some() {
                    return Err(PipelineError::unsupported(
                        "aliasing an embedded relation target is not supported",
                    ));
                }
                let children = call
                    .args
                    .iter()
                    .map(|arg| lower_target_expr(arg, None))
                    .collect::<PipelineResult<Vec<_>>>()?;
                Ok(Target::ResourceTarget {
                    relation: name,
                    children,
                })
            }
        }
        _ => Err(PipelineError::unsupported(
            "unsupported expression in the select list",
        )),
    }
}

fn attach_cast(target: Target, cast_name: String) -> PipelineResult<Target> {
    match target {
        Target::ColumnTarget { column, alias, .. } => Ok(Target::ColumnTarget {
            column,
            alias,
            cast: Some(cast_name),
        }),
        Target::AggregateTarget {
            function,
            column,
            alias,
            ..
        } => Ok(Target::AggregateTarget {
            function,
            column,
            alias,
            cast: Some(cast_name),
        }),
        Target::ResourceTarget { .. } => Err(PipelineError::unsupported(
            "casting an embedded relation is not supported",
        )),
    }
}

fn last_func_name(funcname: &[Node]) -> PipelineResult<String> {
    funcname
        .last()
        .and_then(|n| n.node.as_ref())
        .and_then(|n| match n {
            NodeEnum::String(s) => Some(s.sval.clone()),
            _ => None,
        })
        .ok_or_else(|| PipelineError::unsupported("unexpected function name shape"))
}

fn type_name_to_string(type_name: Option<&TypeName>) -> PipelineResult<String> {
    let type_name =
        type_name.ok_or_else(|| PipelineError::unsupported("cast with no target type"))?;
    last_func_name(&type_name.names)
}
