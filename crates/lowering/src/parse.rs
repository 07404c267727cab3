// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The parse-tree adapter: `[MODULE parse]`.
//!
//! Wraps `pg_query::parse`, which surfaces the real PostgreSQL grammar. This
//! is the only module in the workspace that depends on `pg_query` directly;
//! every other module works against `pg_query::NodeEnum` values handed to it
//! by this adapter.

use crate::error::{PipelineError, PipelineResult};

/// Parse `sql` and return the single statement's parse-tree node.
///
/// Fails with `ParsingError` if the parser rejects the input, and with
/// `UnsupportedError` if the input contains zero or more than one
/// statement. Does not attempt any error recovery.
#[tracing::instrument(skip(sql))]
pub fn parse_one_statement(sql: &str) -> PipelineResult<pg_query::NodeEnum> {
    let parsed = pg_query::parse(sql).map_err(|err| {
        let message = err.to_string();
        let cursor_position = extract_cursor_position(&message).unwrap_or(0);
        let hint = classify_hint(&message);
        tracing::warn!(%message, cursor_position, "sql failed to parse");
        PipelineError::ParsingError {
            message,
            cursor_position,
            hint,
        }
    })?;

    match parsed.protobuf.stmts.len() {
        0 => Err(PipelineError::unsupported(
            "Expected a statement, but received none",
        )),
        1 => {
            let node = parsed
                .protobuf
                .stmts
                .into_iter()
                .next()
                .and_then(|raw| raw.stmt)
                .and_then(|stmt| stmt.node)
                .ok_or_else(|| PipelineError::unsupported("Expected a statement, but received none"))?;
            Ok(node)
        }
        _ => Err(PipelineError::unsupported(
            "Expected a single statement, but received multiple",
        )),
    }
}

/// `pg_query`'s parser errors embed the byte offset as `"... at position N"`;
/// this mirrors the same rfind-and-scan technique used elsewhere in the
/// ecosystem for extracting it (see DESIGN.md).
fn extract_cursor_position(message: &str) -> Option<usize> {
    let pos = message.rfind("position ")?;
    let after = &message[pos + "position ".len()..];
    let digits: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Classify a parser error message into a short, human-directed hint. This
/// is necessarily heuristic: `pg_query` does not expose a structured error
/// kind, only a rendered message, so it matches on characteristic
/// substrings of the PostgreSQL grammar's own error text.
fn classify_hint(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("at end of input") {
        "did you forget a closing parenthesis or a statement terminator?".to_string()
    } else if lower.contains("at or near \",\"") {
        "did you forget a comma, or add one too many?".to_string()
    } else if lower.contains("at or near \")\"") {
        "check for an unmatched closing parenthesis".to_string()
    } else if lower.contains("unterminated quoted string") {
        "check for a missing closing quote".to_string()
    } else if lower.contains("syntax error at or near") {
        "check the keyword or identifier just before this point".to_string()
    } else {
        "check the statement near the reported position".to_string()
    }
}
