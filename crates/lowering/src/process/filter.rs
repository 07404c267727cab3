// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Lowering a `WHERE` clause into a `Filter` tree.
//!
//! Shared by `SELECT`, `UPDATE`, and `DELETE`: all three hand their
//! `where_clause` node to [`lower_where`] and get back the same tree shape.
//! `UPDATE`/`DELETE` additionally run the result through [`require_basic`],
//! since only the six comparison operators are allowed outside `SELECT`.

use crate::error::{PipelineError, PipelineResult};
use crate::process::{atoms, column_ref};
use crate::recursion::RecursionGuard;
use pg_query::protobuf::{AExprKind, BoolExprType, BoolTestType, NullTestType};
use pg_query::protobuf::Node;
use pg_query::NodeEnum;
use sql_to_postgrest_ir::{
    Atom, ColumnFilter, Filter, FilterValue, LogicalFilter, LogicalOperator, Operator,
};

pub fn lower_where(node: &Node) -> PipelineResult<Filter> {
    let mut guard = RecursionGuard::new();
    lower_node(node, &mut guard)
}

fn lower_node(node: &Node, guard: &mut RecursionGuard) -> PipelineResult<Filter> {
    guard.enter()?;
    let result = lower_node_inner(node, guard);
    guard.exit();
    result
}

fn lower_node_inner(node: &Node, guard: &mut RecursionGuard) -> PipelineResult<Filter> {
    match node.node.as_ref() {
        Some(NodeEnum::BoolExpr(expr)) => {
            if expr.boolop == BoolExprType::NotExpr as i32 {
                let inner = expr
                    .args
                    .first()
                    .ok_or_else(|| PipelineError::unsupported("NOT with no operand"))?;
                let mut filter = lower_node(inner, guard)?;
                filter.toggle_negate();
                Ok(filter)
            } else {
                let operator = if expr.boolop == BoolExprType::AndExpr as i32 {
                    LogicalOperator::And
                } else if expr.boolop == BoolExprType::OrExpr as i32 {
                    LogicalOperator::Or
                } else {
                    return Err(PipelineError::unsupported("unsupported boolean operator"));
                };
                let children = expr
                    .args
                    .iter()
                    .map(|arg| lower_node(arg, guard))
                    .collect::<PipelineResult<Vec<_>>>()?;
                Ok(Filter::Logical(LogicalFilter::new(operator, children)?))
            }
        }
        Some(NodeEnum::AExpr(expr)) => lower_a_expr(expr),
        Some(NodeEnum::NullTest(test)) => lower_null_test(test),
        Some(NodeEnum::BooleanTest(test)) => lower_boolean_test(test),
        _ => Err(PipelineError::unsupported(
            "unsupported predicate in the where clause",
        )),
    }
}

fn lower_a_expr(expr: &pg_query::protobuf::AExpr) -> PipelineResult<Filter> {
    let lexpr = expr
        .lexpr
        .as_deref()
        .ok_or_else(|| PipelineError::unsupported("comparison with no left-hand side"))?;
    let column = column_ref::qualified_name(column_ref::as_column_ref(lexpr)?)?;
    let rexpr = expr
        .rexpr
        .as_deref()
        .ok_or_else(|| PipelineError::unsupported("comparison with no right-hand side"))?;

    if expr.kind == AExprKind::AexprIn as i32 {
        let symbol = operator_symbol(&expr.name)?;
        let negate = match symbol.as_str() {
            "=" => false,
            "<>" => true,
            _ => return Err(PipelineError::unsupported("unsupported IN comparator")),
        };
        let items = match rexpr.node.as_ref() {
            Some(NodeEnum::List(list)) => &list.items,
            _ => return Err(PipelineError::unsupported("IN expects a literal list")),
        };
        let values = items
            .iter()
            .map(atoms::node_to_atom)
            .collect::<PipelineResult<Vec<Atom>>>()?;
        let mut filter = ColumnFilter::new(column, Operator::In, FilterValue::List(values));
        filter.negate = negate;
        return Ok(Filter::Column(filter));
    }

    let symbol = operator_symbol(&expr.name)?;
    if symbol == "@@" {
        return lower_full_text(column, rexpr);
    }

    let (operator, negate) = symbol_to_operator(&symbol)
        .ok_or_else(|| PipelineError::unsupported(format!("unsupported operator '{symbol}'")))?;
    let value = FilterValue::Atom(atoms::node_to_atom(rexpr)?);
    let mut filter = ColumnFilter::new(column, operator, value);
    filter.negate = negate;
    Ok(Filter::Column(filter))
}

fn lower_full_text(column: String, rexpr: &Node) -> PipelineResult<Filter> {
    let call = match rexpr.node.as_ref() {
        Some(NodeEnum::FuncCall(call)) => call,
        _ => {
            return Err(PipelineError::unsupported(
                "full-text search expects a to_tsquery-family call",
            ))
        }
    };
    let name = call
        .funcname
        .last()
        .and_then(|n| n.node.as_ref())
        .and_then(|n| match n {
            NodeEnum::String(s) => Some(s.sval.as_str()),
            _ => None,
        })
        .ok_or_else(|| PipelineError::unsupported("unexpected function name shape"))?;
    let operator = match name {
        "to_tsquery" => Operator::Fts,
        "plainto_tsquery" => Operator::Plfts,
        "phraseto_tsquery" => Operator::Phfts,
        "websearch_to_tsquery" => Operator::Wfts,
        other => {
            return Err(PipelineError::unsupported(format!(
                "unsupported full-text search function '{other}'"
            )))
        }
    };
    let query_arg = call
        .args
        .last()
        .ok_or_else(|| PipelineError::unsupported("full-text search call with no arguments"))?;
    let value = FilterValue::Atom(atoms::node_to_atom(query_arg)?);
    Ok(Filter::Column(ColumnFilter::new(column, operator, value)))
}

fn lower_null_test(test: &pg_query::protobuf::NullTest) -> PipelineResult<Filter> {
    let arg = test
        .arg
        .as_deref()
        .ok_or_else(|| PipelineError::unsupported("IS NULL with no operand"))?;
    let column = column_ref::qualified_name(column_ref::as_column_ref(arg)?)?;
    let negate = test.nulltesttype == NullTestType::IsNotNull as i32;
    let mut filter = ColumnFilter::new(column, Operator::Is, FilterValue::Atom(Atom::Null));
    filter.negate = negate;
    Ok(Filter::Column(filter))
}

fn lower_boolean_test(test: &pg_query::protobuf::BooleanTest) -> PipelineResult<Filter> {
    let arg = test
        .arg
        .as_deref()
        .ok_or_else(|| PipelineError::unsupported("IS TRUE/FALSE with no operand"))?;
    let column = column_ref::qualified_name(column_ref::as_column_ref(arg)?)?;
    let (value, negate) = if test.booltesttype == BoolTestType::IsTrue as i32 {
        (true, false)
    } else if test.booltesttype == BoolTestType::IsNotTrue as i32 {
        (true, true)
    } else if test.booltesttype == BoolTestType::IsFalse as i32 {
        (false, false)
    } else if test.booltesttype == BoolTestType::IsNotFalse as i32 {
        (false, true)
    } else {
        return Err(PipelineError::unsupported(
            "IS UNKNOWN is not supported",
        ));
    };
    let mut filter = ColumnFilter::new(column, Operator::Is, FilterValue::Atom(Atom::Bool(value)));
    filter.negate = negate;
    Ok(Filter::Column(filter))
}

fn operator_symbol(name: &[Node]) -> PipelineResult<String> {
    name.last()
        .and_then(|n| n.node.as_ref())
        .and_then(|n| match n {
            NodeEnum::String(s) => Some(s.sval.clone()),
            _ => None,
        })
        .ok_or_else(|| PipelineError::unsupported("unexpected operator shape"))
}

fn symbol_to_operator(symbol: &str) -> Option<(Operator, bool)> {
    Some(match symbol {
        "=" => (Operator::Eq, false),
        "<>" | "!=" => (Operator::Neq, false),
        ">" => (Operator::Gt, false),
        ">=" => (Operator::Gte, false),
        "<" => (Operator::Lt, false),
        "<=" => (Operator::Lte, false),
        "~~" => (Operator::Like, false),
        "!~~" => (Operator::Like, true),
        "~~*" => (Operator::Ilike, false),
        "!~~*" => (Operator::Ilike, true),
        "@>" => (Operator::Cs, false),
        "<@" => (Operator::Cd, false),
        "&&" => (Operator::Ov, false),
        "<<" => (Operator::Sl, false),
        ">>" => (Operator::Sr, false),
        "&<" => (Operator::Nxr, false),
        "&>" => (Operator::Nxl, false),
        "-|-" => (Operator::Adj, false),
        _ => return None,
    })
}

/// Reject anything other than the six basic comparison operators, anywhere
/// in the tree. Used by `UPDATE`/`DELETE`, which accept `AND`/`OR` but not
/// the full `SELECT` operator vocabulary.
pub fn require_basic(filter: &Filter) -> PipelineResult<()> {
    match filter {
        Filter::Column(c) => {
            if !c.operator.is_basic() {
                return Err(PipelineError::unsupported(format!(
                    "operator '{}' is not supported outside of select statements",
                    c.operator.as_str()
                )));
            }
            Ok(())
        }
        Filter::Logical(l) => {
            for child in &l.values {
                require_basic(child)?;
            }
            Ok(())
        }
    }
}
