// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sql-to-postgrest: lowering
//!
//! The parse-tree adapter and per-statement processors: SQL text in,
//! `Statement` IR out.
//!
//! ```text
//! sql text --[parse]--> pg_query::NodeEnum --[process]--> Statement
//! ```
//!
//! [`translate`] is the single public entry point. It is fail-fast: the
//! first unsupported construct anywhere in the statement aborts the whole
//! translation with a typed [`PipelineError`] rather than returning a
//! partially built `Statement`.

mod parse;
mod process;
mod recursion;

pub mod error;

pub use error::{PipelineError, PipelineResult};

use sql_to_postgrest_ir::Statement;

/// Parse and lower one SQL statement into its `Statement` IR.
#[tracing::instrument(skip(sql))]
pub fn translate(sql: &str) -> PipelineResult<Statement> {
    let node = parse::parse_one_statement(sql)?;
    process::dispatch(node)
}
