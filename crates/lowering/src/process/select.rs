// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Lowering a `SelectStmt` into `Select`.

use crate::error::{PipelineError, PipelineResult};
use crate::process::filter::lower_where;
use crate::process::target::lower_target_expr;
use crate::process::{atoms, column_ref};
use pg_query::protobuf::{
    JoinType, Node, RangeVar, SelectStmt, SetOperation, SortByDir, SortByNulls,
};
use pg_query::NodeEnum;
use sql_to_postgrest_ir::{Direction, Limit, Nulls, Select, Sort, Target};

pub fn lower(stmt: &SelectStmt) -> PipelineResult<Select> {
    reject_unsupported_clauses(stmt)?;

    let (from, embed) = lower_from_clause(&stmt.from_clause)?;

    let mut targets = stmt
        .target_list
        .iter()
        .map(lower_res_target)
        .collect::<PipelineResult<Vec<_>>>()?;
    if targets.is_empty() {
        return Err(PipelineError::unsupported("select with no target list"));
    }
    if let Some(embed) = embed {
        targets.push(embed);
    }

    let mut select = Select::new(from, targets)?;

    if let Some(where_clause) = stmt.where_clause.as_deref() {
        select.filter = Some(lower_where(where_clause)?);
    }

    select.sorts = stmt
        .sort_clause
        .iter()
        .map(lower_sort_by)
        .collect::<PipelineResult<Vec<_>>>()?;

    select.limit = lower_limit(stmt)?;

    Ok(select)
}

/// Reject clauses the restricted subset has no IR shape for, rather than
/// silently dropping them: `GROUP BY`/`HAVING`, window functions, `WITH`
/// (CTEs), `FOR UPDATE`/`FOR SHARE` locking, `DISTINCT`, and set operations
/// (`UNION`/`INTERSECT`/`EXCEPT`).
fn reject_unsupported_clauses(stmt: &SelectStmt) -> PipelineResult<()> {
    if !stmt.group_clause.is_empty() {
        return Err(PipelineError::unsupported("GROUP BY is not supported"));
    }
    if stmt.having_clause.is_some() {
        return Err(PipelineError::unsupported("HAVING is not supported"));
    }
    if !stmt.window_clause.is_empty() {
        return Err(PipelineError::unsupported(
            "window functions are not supported",
        ));
    }
    if stmt.with_clause.is_some() {
        return Err(PipelineError::unsupported(
            "CTEs (WITH clauses) are not supported",
        ));
    }
    if !stmt.locking_clause.is_empty() {
        return Err(PipelineError::unsupported(
            "FOR UPDATE/FOR SHARE locking clauses are not supported",
        ));
    }
    if !stmt.distinct_clause.is_empty() {
        return Err(PipelineError::unsupported("SELECT DISTINCT is not supported"));
    }
    if stmt.op != SetOperation::SetopNone as i32 {
        return Err(PipelineError::unsupported(
            "set operations (UNION/INTERSECT/EXCEPT) are not supported",
        ));
    }
    Ok(())
}

fn lower_res_target(node: &Node) -> PipelineResult<Target> {
    match node.node.as_ref() {
        Some(NodeEnum::ResTarget(rt)) => {
            let alias = if rt.name.is_empty() {
                None
            } else {
                Some(rt.name.clone())
            };
            let val = rt
                .val
                .as_deref()
                .ok_or_else(|| PipelineError::unsupported("select item with no expression"))?;
            lower_target_expr(val, alias)
        }
        _ => Err(PipelineError::unsupported(
            "unexpected node in the select list",
        )),
    }
}

fn lower_from_clause(from_clause: &[Node]) -> PipelineResult<(String, Option<Target>)> {
    let item = match from_clause {
        [item] => item,
        [] => return Err(PipelineError::unsupported("select with no from clause")),
        _ => {
            return Err(PipelineError::unsupported(
                "selecting from more than one relation is not supported",
            ))
        }
    };

    match item.node.as_ref() {
        Some(NodeEnum::RangeVar(range_var)) => Ok((range_var_name(range_var), None)),
        Some(NodeEnum::JoinExpr(join)) => {
            if join.jointype != JoinType::JoinInner as i32 {
                return Err(PipelineError::unsupported(
                    "only simple inner-join embeds are supported",
                ));
            }
            let left = as_range_var(join.larg.as_deref())?;
            let right = as_range_var(join.rarg.as_deref())?;
            let quals = join
                .quals
                .as_deref()
                .ok_or_else(|| PipelineError::unsupported("join with no ON condition"))?;
            verify_equi_join(quals)?;
            Ok((
                range_var_name(left),
                Some(Target::ResourceTarget {
                    relation: range_var_name(right),
                    children: vec![Target::wildcard()],
                }),
            ))
        }
        _ => Err(PipelineError::unsupported(
            "unsupported shape in the from clause",
        )),
    }
}

fn as_range_var(node: Option<&Node>) -> PipelineResult<&RangeVar> {
    match node.and_then(|n| n.node.as_ref()) {
        Some(NodeEnum::RangeVar(rv)) => Ok(rv),
        _ => Err(PipelineError::unsupported(
            "join sides must be plain table references",
        )),
    }
}

fn range_var_name(range_var: &RangeVar) -> String {
    range_var.relname.clone()
}

/// Confirm the join condition is a plain `a = b` equality between two
/// qualified columns that is *shaped* like a foreign key relationship:
/// `<table>.id = <other_table>.<table>_id` or the reverse (singular or
/// plural table name on the referencing side, e.g. `authors.id =
/// books.author_id`). No catalog is consulted (schema introspection is out
/// of scope); this is a syntactic judgment only. Anything richer (compound
/// conditions, non-equi operators, `USING`, or an equality that isn't
/// shaped this way) is rejected.
fn verify_equi_join(quals: &Node) -> PipelineResult<()> {
    match quals.node.as_ref() {
        Some(NodeEnum::AExpr(expr)) => {
            let symbol = expr
                .name
                .last()
                .and_then(|n| n.node.as_ref())
                .and_then(|n| match n {
                    NodeEnum::String(s) => Some(s.sval.as_str()),
                    _ => None,
                });
            if symbol != Some("=") {
                return Err(PipelineError::unsupported(
                    "join conditions must be a plain equality",
                ));
            }
            let lexpr = expr
                .lexpr
                .as_deref()
                .ok_or_else(|| PipelineError::unsupported("join condition with no left side"))?;
            let rexpr = expr
                .rexpr
                .as_deref()
                .ok_or_else(|| PipelineError::unsupported("join condition with no right side"))?;
            let left = column_ref::qualified_name(column_ref::as_column_ref(lexpr)?)?;
            let right = column_ref::qualified_name(column_ref::as_column_ref(rexpr)?)?;
            if !is_foreign_key_shaped(&left, &right) && !is_foreign_key_shaped(&right, &left) {
                return Err(PipelineError::unsupported(
                    "join condition does not look like a foreign-key relationship (expected `<table>.id = <other>.<table>_id`)",
                ));
            }
            Ok(())
        }
        _ => Err(PipelineError::unsupported(
            "join conditions must be a plain equality",
        )),
    }
}

/// Whether `pk_side` (`<table>.id`) and `fk_side` (`<other>.<table>_id`, in
/// either singular or plural form of `<table>`) together look like a
/// foreign-key column pair.
fn is_foreign_key_shaped(pk_side: &str, fk_side: &str) -> bool {
    let Some((pk_table, pk_column)) = pk_side.rsplit_once('.') else {
        return false;
    };
    if pk_column != "id" {
        return false;
    }
    let Some((_, fk_column)) = fk_side.rsplit_once('.') else {
        return false;
    };
    let singular = pk_table.strip_suffix('s').unwrap_or(pk_table);
    fk_column == format!("{pk_table}_id") || fk_column == format!("{singular}_id")
}

fn lower_sort_by(node: &Node) -> PipelineResult<Sort> {
    let sort_by = match node.node.as_ref() {
        Some(NodeEnum::SortBy(s)) => s,
        _ => return Err(PipelineError::unsupported("unexpected node in order by")),
    };
    let target = sort_by
        .node
        .as_ref()
        .ok_or_else(|| PipelineError::unsupported("order by with no expression"))?;
    let column = column_ref::qualified_name(column_ref::as_column_ref(target)?)?;
    let mut sort = Sort::new(column);
    sort.direction = if sort_by.sortby_dir == SortByDir::SortbyAsc as i32 {
        Some(Direction::Asc)
    } else if sort_by.sortby_dir == SortByDir::SortbyDesc as i32 {
        Some(Direction::Desc)
    } else {
        None
    };
    sort.nulls = if sort_by.sortby_nulls == SortByNulls::SortbyNullsFirst as i32 {
        Some(Nulls::First)
    } else if sort_by.sortby_nulls == SortByNulls::SortbyNullsLast as i32 {
        Some(Nulls::Last)
    } else {
        None
    };
    Ok(sort)
}

fn lower_limit(stmt: &SelectStmt) -> PipelineResult<Option<Limit>> {
    let count = stmt
        .limit_count
        .as_deref()
        .map(|n| limit_integer(n))
        .transpose()?;
    let offset = stmt
        .limit_offset
        .as_deref()
        .map(|n| limit_integer(n))
        .transpose()?;
    if count.is_none() && offset.is_none() {
        return Ok(None);
    }
    Ok(Some(Limit { count, offset }))
}

fn limit_integer(node: &Node) -> PipelineResult<u64> {
    match atoms::node_to_atom(node)? {
        sql_to_postgrest_ir::Atom::Number(n) if n >= 0.0 && n.fract() == 0.0 => Ok(n as u64),
        _ => Err(PipelineError::unsupported(
            "limit/offset must be a non-negative integer literal",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(sql: &str) -> Select {
        let parsed = pg_query::parse(sql).unwrap();
        let stmt = parsed.protobuf.stmts.into_iter().next().unwrap();
        match stmt.stmt.unwrap().node.unwrap() {
            NodeEnum::SelectStmt(s) => lower(&s).unwrap(),
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn star_select_is_the_canonical_wildcard() {
        let s = select("select * from books");
        assert_eq!(s.from, "books");
        assert!(Target::is_canonical_wildcard(&s.targets));
    }

    #[test]
    fn order_by_collects_direction_and_nulls() {
        let s = select("select id from books order by id desc nulls last");
        assert_eq!(s.sorts.len(), 1);
        assert_eq!(s.sorts[0].direction, Some(Direction::Desc));
        assert_eq!(s.sorts[0].nulls, Some(Nulls::Last));
    }

    #[test]
    fn limit_and_offset_are_captured() {
        let s = select("select id from books limit 5 offset 10");
        let limit = s.limit.unwrap();
        assert_eq!(limit.count, Some(5));
        assert_eq!(limit.offset, Some(10));
    }

    #[test]
    fn simple_equi_join_becomes_an_embed() {
        let s = select("select * from books join authors on books.author_id = authors.id");
        assert_eq!(s.from, "books");
        assert!(s
            .targets
            .iter()
            .any(|t| matches!(t, Target::ResourceTarget { relation, .. } if relation == "authors")));
    }

    #[test]
    fn join_on_non_foreign_key_shaped_columns_is_unsupported() {
        let parsed =
            pg_query::parse("select * from books join authors on books.title = authors.name")
                .unwrap();
        let stmt = parsed.protobuf.stmts.into_iter().next().unwrap();
        match stmt.stmt.unwrap().node.unwrap() {
            NodeEnum::SelectStmt(s) => assert!(lower(&s).is_err()),
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn more_than_one_from_item_is_unsupported() {
        let parsed = pg_query::parse("select * from books, authors").unwrap();
        let stmt = parsed.protobuf.stmts.into_iter().next().unwrap();
        match stmt.stmt.unwrap().node.unwrap() {
            NodeEnum::SelectStmt(s) => assert!(lower(&s).is_err()),
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn group_by_is_rejected() {
        let parsed = pg_query::parse("select id, count(*) from books group by id").unwrap();
        let stmt = parsed.protobuf.stmts.into_iter().next().unwrap();
        match stmt.stmt.unwrap().node.unwrap() {
            NodeEnum::SelectStmt(s) => assert!(lower(&s).is_err()),
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn union_is_rejected() {
        let parsed = pg_query::parse("select id from books union select id from authors").unwrap();
        let stmt = parsed.protobuf.stmts.into_iter().next().unwrap();
        match stmt.stmt.unwrap().node.unwrap() {
            NodeEnum::SelectStmt(s) => assert!(lower(&s).is_err()),
            _ => panic!("expected select"),
        }
    }
}
