// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Lowering a `DeleteStmt` into `Delete`.

use crate::error::{PipelineError, PipelineResult};
use crate::process::filter::{lower_where, require_basic};
use crate::process::returning::returning_columns;
use pg_query::protobuf::DeleteStmt;
use sql_to_postgrest_ir::Delete;

pub fn lower(stmt: &DeleteStmt) -> PipelineResult<Delete> {
    let relation = stmt
        .relation
        .as_ref()
        .ok_or_else(|| PipelineError::unsupported("delete with no target relation"))?;
    let mut delete = Delete::new(relation.relname.clone());

    if let Some(where_clause) = stmt.where_clause.as_deref() {
        let filter = lower_where(where_clause)?;
        require_basic(&filter)?;
        delete.filter = Some(filter);
    }

    if !stmt.returning_list.is_empty() {
        delete.returning = Some(returning_columns(&stmt.returning_list)?);
    }

    Ok(delete)
}
