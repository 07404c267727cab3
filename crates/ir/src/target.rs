// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Projection targets for a `SELECT` list.
//!
//! A `Target` is one item in `Select.targets`. PostgREST's `select=`
//! parameter can name a plain column, a cast column, an aggregate, or an
//! embedded relation; each gets its own `Target` variant rather than one
//! flat struct with a pile of `Option` fields, so a renderer can match
//! exhaustively instead of guessing which fields are meaningful together.

use serde::{Deserialize, Serialize};

/// One item of a `SELECT` projection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// A plain column, e.g. `title`, `title as t`, `price::text`.
    ColumnTarget {
        column: String,
        alias: Option<String>,
        cast: Option<String>,
    },
    /// An embedded relation, e.g. `authors(name, bio)`.
    ResourceTarget {
        relation: String,
        children: Vec<Target>,
    },
    /// An aggregate applied to a column or to `*`, e.g. `count(*)`, `sum(price)`.
    AggregateTarget {
        function: AggregateFunction,
        /// `None` means the aggregate was applied to `*` (only meaningful for `count`).
        column: Option<String>,
        alias: Option<String>,
        cast: Option<String>,
    },
}

impl Target {
    /// The canonical "no projection" marker: a lone `ColumnTarget("*")`.
    pub fn wildcard() -> Self {
        Target::ColumnTarget {
            column: "*".to_string(),
            alias: None,
            cast: None,
        }
    }

    /// Whether `targets` is exactly `[wildcard()]`, PostgREST's "no `select=`
    /// parameter needed" case.
    pub fn is_canonical_wildcard(targets: &[Target]) -> bool {
        matches!(
            targets,
            [Target::ColumnTarget {
                column,
                alias: None,
                cast: None,
            }] if column == "*"
        )
    }
}

/// Aggregate functions supported by the restricted subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunction {
    /// PostgREST spells every aggregate lowercase in the `select=` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            AggregateFunction::Count => "count",
            AggregateFunction::Sum => "sum",
            AggregateFunction::Avg => "avg",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
        }
    }

    /// Parse a SQL function name into an `AggregateFunction`, case-insensitively.
    pub fn from_sql_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "count" => Some(AggregateFunction::Count),
            "sum" => Some(AggregateFunction::Sum),
            "avg" => Some(AggregateFunction::Avg),
            "min" => Some(AggregateFunction::Min),
            "max" => Some(AggregateFunction::Max),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_is_recognized_as_canonical() {
        assert!(Target::is_canonical_wildcard(&[Target::wildcard()]));
    }

    #[test]
    fn aliased_wildcard_is_not_canonical() {
        let t = Target::ColumnTarget {
            column: "*".into(),
            alias: Some("everything".into()),
            cast: None,
        };
        assert!(!Target::is_canonical_wildcard(&[t]));
    }

    #[test]
    fn multiple_targets_are_never_canonical() {
        assert!(!Target::is_canonical_wildcard(&[
            Target::wildcard(),
            Target::wildcard()
        ]));
    }

    #[test]
    fn aggregate_function_round_trips_through_sql_name() {
        assert_eq!(
            AggregateFunction::from_sql_name("COUNT"),
            Some(AggregateFunction::Count)
        );
        assert_eq!(AggregateFunction::Count.as_str(), "count");
        assert_eq!(AggregateFunction::from_sql_name("length"), None);
    }
}
