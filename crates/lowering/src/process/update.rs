// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Lowering an `UpdateStmt` into `Update`.

use crate::error::{PipelineError, PipelineResult};
use crate::process::atoms;
use crate::process::filter::{lower_where, require_basic};
use crate::process::returning::returning_columns;
use pg_query::protobuf::{Node, UpdateStmt};
use pg_query::NodeEnum;
use sql_to_postgrest_ir::{Atom, Update};

pub fn lower(stmt: &UpdateStmt) -> PipelineResult<Update> {
    let relation = stmt
        .relation
        .as_ref()
        .ok_or_else(|| PipelineError::unsupported("update with no target relation"))?;
    let table = relation.relname.clone();

    let set = stmt
        .target_list
        .iter()
        .map(lower_set_item)
        .collect::<PipelineResult<Vec<_>>>()?;

    let mut update = Update::new(table, set)?;

    if let Some(where_clause) = stmt.where_clause.as_deref() {
        let filter = lower_where(where_clause)?;
        require_basic(&filter)?;
        update.filter = Some(filter);
    }

    if !stmt.returning_list.is_empty() {
        update.returning = Some(returning_columns(&stmt.returning_list)?);
    }

    Ok(update)
}

fn lower_set_item(node: &Node) -> PipelineResult<(String, Atom)> {
    match node.node.as_ref() {
        Some(NodeEnum::ResTarget(rt)) if !rt.name.is_empty() => {
            let val = rt
                .val
                .as_deref()
                .ok_or_else(|| PipelineError::unsupported("set clause with no value"))?;
            Ok((rt.name.clone(), atoms::node_to_atom(val)?))
        }
        _ => Err(PipelineError::unsupported(
            "unexpected node in the set clause",
        )),
    }
}
