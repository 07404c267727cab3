// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Lowering an `InsertStmt` into `Insert`.

use crate::error::{PipelineError, PipelineResult};
use crate::process::atoms;
use crate::process::returning::returning_columns;
use pg_query::protobuf::{InsertStmt, Node};
use pg_query::NodeEnum;
use sql_to_postgrest_ir::{Atom, Insert};

pub fn lower(stmt: &InsertStmt) -> PipelineResult<Insert> {
    let relation = stmt
        .relation
        .as_ref()
        .ok_or_else(|| PipelineError::unsupported("insert with no target relation"))?;
    let into = relation.relname.clone();

    if stmt.on_conflict_clause.is_some() {
        return Err(PipelineError::unsupported("ON CONFLICT is not supported"));
    }

    let columns = stmt
        .cols
        .iter()
        .map(column_name)
        .collect::<PipelineResult<Vec<_>>>()?;

    let values = lower_values(stmt.select_stmt.as_deref())?;

    let mut insert = Insert::new(into, columns, values)?;
    if !stmt.returning_list.is_empty() {
        insert.returning = Some(returning_columns(&stmt.returning_list)?);
    }
    Ok(insert)
}

fn column_name(node: &Node) -> PipelineResult<String> {
    match node.node.as_ref() {
        Some(NodeEnum::ResTarget(rt)) if !rt.name.is_empty() => Ok(rt.name.clone()),
        _ => Err(PipelineError::unsupported(
            "unexpected node in the insert column list",
        )),
    }
}

fn lower_values(select_stmt: Option<&Node>) -> PipelineResult<Vec<Vec<Atom>>> {
    let select_stmt = select_stmt
        .ok_or_else(|| PipelineError::unsupported("insert with no values clause"))?;
    let select = match select_stmt.node.as_ref() {
        Some(NodeEnum::SelectStmt(s)) => s,
        _ => return Err(PipelineError::unsupported("unexpected insert source")),
    };
    if select.values_lists.is_empty() {
        return Err(PipelineError::unsupported(
            "INSERT ... SELECT is not supported",
        ));
    }
    select
        .values_lists
        .iter()
        .map(|row| match row.node.as_ref() {
            Some(NodeEnum::List(list)) => {
                list.items.iter().map(atoms::node_to_atom).collect::<PipelineResult<Vec<_>>>()
            }
            _ => Err(PipelineError::unsupported("unexpected row shape in VALUES")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(sql: &str) -> Insert {
        let parsed = pg_query::parse(sql).unwrap();
        let stmt = parsed.protobuf.stmts.into_iter().next().unwrap();
        match stmt.stmt.unwrap().node.unwrap() {
            NodeEnum::InsertStmt(s) => lower(&s).unwrap(),
            _ => panic!("expected insert"),
        }
    }

    #[test]
    fn single_row_with_columns() {
        let i = insert("insert into books (title, year) values ('Dune', 1965)");
        assert_eq!(i.into, "books");
        assert_eq!(i.columns, vec!["title".to_string(), "year".to_string()]);
        assert_eq!(i.values.len(), 1);
        assert_eq!(i.values[0].len(), 2);
    }

    #[test]
    fn multiple_rows_keep_order() {
        let i = insert("insert into books (title) values ('Dune'), ('Foundation')");
        assert_eq!(i.values.len(), 2);
        assert_eq!(i.values[0][0], Atom::String("Dune".to_string()));
        assert_eq!(i.values[1][0], Atom::String("Foundation".to_string()));
    }

    #[test]
    fn returning_collects_plain_columns() {
        let i = insert("insert into books (title) values ('Dune') returning id, title");
        assert_eq!(
            i.returning,
            Some(vec!["id".to_string(), "title".to_string()])
        );
    }

    #[test]
    fn on_conflict_is_unsupported() {
        let parsed =
            pg_query::parse("insert into books (id) values (1) on conflict (id) do nothing")
                .unwrap();
        let stmt = parsed.protobuf.stmts.into_iter().next().unwrap();
        match stmt.stmt.unwrap().node.unwrap() {
            NodeEnum::InsertStmt(s) => assert!(lower(&s).is_err()),
            _ => panic!("expected insert"),
        }
    }

    #[test]
    fn insert_select_is_unsupported() {
        let parsed = pg_query::parse("insert into books select * from staging_books").unwrap();
        let stmt = parsed.protobuf.stmts.into_iter().next().unwrap();
        match stmt.stmt.unwrap().node.unwrap() {
            NodeEnum::InsertStmt(s) => assert!(lower(&s).is_err()),
            _ => panic!("expected insert"),
        }
    }
}
