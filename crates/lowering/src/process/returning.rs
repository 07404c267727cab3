// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Lowering a `RETURNING` list, shared by `INSERT`, `UPDATE`, and `DELETE`.

use crate::error::{PipelineError, PipelineResult};
use pg_query::protobuf::Node;
use pg_query::NodeEnum;

/// Each entry must be a plain, unaliased column reference; a qualified
/// reference (`books.id`) keeps only its last segment.
pub fn returning_columns(returning_list: &[Node]) -> PipelineResult<Vec<String>> {
    returning_list
        .iter()
        .map(|node| match node.node.as_ref() {
            Some(NodeEnum::ResTarget(rt)) if rt.name.is_empty() => match rt.val.as_deref() {
                Some(val) => match val.node.as_ref() {
                    Some(NodeEnum::ColumnRef(c)) => c
                        .fields
                        .last()
                        .and_then(|n| n.node.as_ref())
                        .and_then(|n| match n {
                            NodeEnum::String(s) => Some(s.sval.clone()),
                            _ => None,
                        })
                        .ok_or_else(|| {
                            PipelineError::unsupported("unexpected column reference in RETURNING")
                        }),
                    _ => Err(PipelineError::unsupported(
                        "RETURNING accepts only plain column names",
                    )),
                },
                None => Err(PipelineError::unsupported("RETURNING with no expression")),
            },
            _ => Err(PipelineError::unsupported(
                "RETURNING accepts only plain, unaliased column names",
            )),
        })
        .collect()
}
