// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The per-statement processors: `[MODULE process]`.
//!
//! Each submodule lowers one `pg_query::NodeEnum` statement variant into its
//! matching `Statement` IR variant. `filter`, `target`, `atoms`, `column_ref`,
//! and `returning` hold logic shared across more than one statement kind.

mod atoms;
mod column_ref;
mod delete;
mod filter;
mod insert;
mod returning;
mod select;
mod target;
mod update;

use crate::error::{PipelineError, PipelineResult};
use pg_query::NodeEnum;
use sql_to_postgrest_ir::Statement;

/// Dispatch a parsed statement node to its processor.
///
/// Anything outside `SELECT`/`INSERT`/`UPDATE`/`DELETE` falls into one of two
/// buckets, per the distinction spec.md draws between them: a statement kind
/// that is meant to eventually be in scope but simply hasn't been built yet
/// (`EXPLAIN`) fails `UnimplementedError`; a statement kind that is not, and
/// will not be, part of this subset (DDL, DCL, transaction control, …) fails
/// `UnsupportedError`, named by kind.
pub fn dispatch(node: NodeEnum) -> PipelineResult<Statement> {
    match node {
        NodeEnum::SelectStmt(stmt) => Ok(Statement::Select(select::lower(&stmt)?)),
        NodeEnum::InsertStmt(stmt) => Ok(Statement::Insert(insert::lower(&stmt)?)),
        NodeEnum::UpdateStmt(stmt) => Ok(Statement::Update(update::lower(&stmt)?)),
        NodeEnum::DeleteStmt(stmt) => Ok(Statement::Delete(delete::lower(&stmt)?)),
        NodeEnum::ExplainStmt(_) => Err(PipelineError::unimplemented("EXPLAIN is not yet supported")),
        other => Err(PipelineError::unsupported(format!(
            "{} statements are not supported",
            statement_kind_name(&other)
        ))),
    }
}

fn statement_kind_name(node: &NodeEnum) -> &'static str {
    match node {
        NodeEnum::VacuumStmt(_) => "VACUUM",
        NodeEnum::TransactionStmt(_) => "transaction control",
        NodeEnum::CreateStmt(_) => "CREATE TABLE",
        NodeEnum::AlterTableStmt(_) => "ALTER TABLE",
        NodeEnum::DropStmt(_) => "DROP",
        NodeEnum::CopyStmt(_) => "COPY",
        NodeEnum::GrantStmt(_) => "GRANT/REVOKE",
        NodeEnum::CreateFunctionStmt(_) => "CREATE FUNCTION",
        NodeEnum::ViewStmt(_) => "CREATE VIEW",
        _ => "this statement kind",
    }
}
