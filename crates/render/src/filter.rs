// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The filter-root routine.
//!
//! This is the one place boolean tree structure interacts with URL syntax.
//! At the root of a statement's filter, a non-negated `AND` is *flattened*:
//! each child becomes its own top-level query parameter instead of a single
//! `and=(...)` parameter, recursively, for as long as the root stays a
//! non-negated `and`. Anything else at the root (a negated `and`, any
//! `or`, or a bare `ColumnFilter`) renders as a single `(key, value)`
//! pair. Below the root, `and`/`or` never flatten; they nest as
//! `and(...)`/`or(...)`.

use crate::literal;
use sql_to_postgrest_ir::{Filter, LogicalFilter, LogicalOperator, Operator};

/// Render a statement's top-level filter into the ordered `(key, value)`
/// pairs it contributes to the query string.
pub fn render_root(filter: &Filter) -> Vec<(String, String)> {
    match filter {
        Filter::Logical(l) if l.operator == LogicalOperator::And && !l.negate => {
            l.values.iter().flat_map(render_root).collect()
        }
        Filter::Column(c) => vec![(c.column.clone(), render_column_value(c))],
        Filter::Logical(l) => vec![(l.operator.as_str().to_string(), render_logical_value(l))],
    }
}

fn render_column_value(c: &sql_to_postgrest_ir::ColumnFilter) -> String {
    format!("{}{}", negate_prefix(c.negate), render_operation(c.operator, &c.value))
}

fn render_logical_value(l: &LogicalFilter) -> String {
    let children = l
        .values
        .iter()
        .map(render_nested)
        .collect::<Vec<_>>()
        .join(",");
    format!("{}({children})", negate_prefix(l.negate))
}

/// Render a filter node that is *not* at the root: a `ColumnFilter` becomes
/// `column.op.value`, a `LogicalFilter` always nests as `op(child,...)`
/// regardless of whether it is an `and`; flattening is a root-only
/// optimization.
fn render_nested(filter: &Filter) -> String {
    match filter {
        Filter::Column(c) => format!(
            "{}.{}{}",
            c.column,
            negate_prefix(c.negate),
            render_operation(c.operator, &c.value)
        ),
        Filter::Logical(l) => format!(
            "{}{}({})",
            negate_prefix(l.negate),
            l.operator.as_str(),
            l.values.iter().map(render_nested).collect::<Vec<_>>().join(",")
        ),
    }
}

fn negate_prefix(negate: bool) -> &'static str {
    if negate {
        "not."
    } else {
        ""
    }
}

fn render_operation(operator: Operator, value: &sql_to_postgrest_ir::FilterValue) -> String {
    use sql_to_postgrest_ir::FilterValue;
    match (operator, value) {
        (Operator::Is, FilterValue::Atom(atom)) => {
            format!("{}.{}", operator.as_str(), literal::render_is_keyword(atom))
        }
        (Operator::In, FilterValue::List(items)) => {
            let inner = items.iter().map(literal::render_atom).collect::<Vec<_>>().join(",");
            format!("{}.({inner})", operator.as_str())
        }
        (_, FilterValue::Atom(atom)) => format!("{}.{}", operator.as_str(), literal::render_atom(atom)),
        (_, FilterValue::List(items)) => {
            // Reachable only for a malformed IR (a list value on a
            // non-`in` operator); render the same way `in` would so the
            // output stays well-formed instead of panicking.
            let inner = items.iter().map(literal::render_atom).collect::<Vec<_>>().join(",");
            format!("{}.({inner})", operator.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_to_postgrest_ir::{Atom, ColumnFilter, FilterValue};

    fn col(column: &str, op: Operator, value: Atom) -> Filter {
        Filter::Column(ColumnFilter::new(column, op, FilterValue::Atom(value)))
    }

    #[test]
    fn single_column_filter_renders_one_pair() {
        let f = col("id", Operator::Eq, Atom::Number(1.0));
        assert_eq!(render_root(&f), vec![("id".to_string(), "eq.1".to_string())]);
    }

    #[test]
    fn negated_column_filter_gets_not_prefix() {
        let mut f = col("id", Operator::Eq, Atom::Number(1.0));
        f.toggle_negate();
        assert_eq!(render_root(&f), vec![("id".to_string(), "not.eq.1".to_string())]);
    }

    #[test]
    fn non_negated_root_and_flattens_to_separate_params() {
        let f = Filter::Logical(
            LogicalFilter::new(
                LogicalOperator::And,
                vec![
                    col("id", Operator::Eq, Atom::Number(1.0)),
                    col("title", Operator::Eq, Atom::String("dune".into())),
                ],
            )
            .unwrap(),
        );
        assert_eq!(
            render_root(&f),
            vec![
                ("id".to_string(), "eq.1".to_string()),
                ("title".to_string(), "eq.dune".to_string()),
            ]
        );
    }

    #[test]
    fn nested_root_and_flattens_recursively() {
        let inner = Filter::Logical(
            LogicalFilter::new(
                LogicalOperator::And,
                vec![
                    col("a", Operator::Eq, Atom::Number(1.0)),
                    col("b", Operator::Eq, Atom::Number(2.0)),
                ],
            )
            .unwrap(),
        );
        let outer = Filter::Logical(
            LogicalFilter::new(
                LogicalOperator::And,
                vec![inner, col("c", Operator::Eq, Atom::Number(3.0))],
            )
            .unwrap(),
        );
        assert_eq!(
            render_root(&outer),
            vec![
                ("a".to_string(), "eq.1".to_string()),
                ("b".to_string(), "eq.2".to_string()),
                ("c".to_string(), "eq.3".to_string()),
            ]
        );
    }

    #[test]
    fn negated_root_and_does_not_flatten() {
        let mut f = Filter::Logical(
            LogicalFilter::new(
                LogicalOperator::And,
                vec![
                    col("id", Operator::Eq, Atom::Number(1.0)),
                    col("title", Operator::Eq, Atom::String("dune".into())),
                ],
            )
            .unwrap(),
        );
        f.toggle_negate();
        assert_eq!(
            render_root(&f),
            vec![("and".to_string(), "not.(id.eq.1,title.eq.dune)".to_string())]
        );
    }

    #[test]
    fn or_at_root_is_a_single_parameter() {
        let f = Filter::Logical(
            LogicalFilter::new(
                LogicalOperator::Or,
                vec![
                    col("id", Operator::Eq, Atom::Number(1.0)),
                    col("title", Operator::Eq, Atom::String("dune".into())),
                ],
            )
            .unwrap(),
        );
        assert_eq!(
            render_root(&f),
            vec![("or".to_string(), "(id.eq.1,title.eq.dune)".to_string())]
        );
    }

    #[test]
    fn nested_and_inside_or_does_not_flatten() {
        // `(rating > 4 and year < 2000) or author = 'asimov'`
        let inner_and = Filter::Logical(
            LogicalFilter::new(
                LogicalOperator::And,
                vec![
                    col("rating", Operator::Gt, Atom::Number(4.0)),
                    col("year", Operator::Lt, Atom::Number(2000.0)),
                ],
            )
            .unwrap(),
        );
        let root = Filter::Logical(
            LogicalFilter::new(
                LogicalOperator::Or,
                vec![inner_and, col("author", Operator::Eq, Atom::String("asimov".into()))],
            )
            .unwrap(),
        );
        assert_eq!(
            render_root(&root),
            vec![(
                "or".to_string(),
                "(and(rating.gt.4,year.lt.2000),author.eq.asimov)".to_string()
            )]
        );
    }

    #[test]
    fn in_operator_renders_a_parenthesized_list() {
        let f = Filter::Column(ColumnFilter::new(
            "id",
            Operator::In,
            FilterValue::List(vec![Atom::Number(1.0), Atom::Number(2.0), Atom::Number(3.0)]),
        ));
        assert_eq!(render_root(&f), vec![("id".to_string(), "in.(1,2,3)".to_string())]);
    }

    #[test]
    fn is_null_renders_the_bare_keyword() {
        let f = col("deleted_at", Operator::Is, Atom::Null);
        assert_eq!(
            render_root(&f),
            vec![("deleted_at".to_string(), "is.null".to_string())]
        );
    }
}
