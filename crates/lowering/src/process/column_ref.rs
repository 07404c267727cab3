// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Resolving a `ColumnRef` parse-tree node into a dotted column name.

use crate::error::{PipelineError, PipelineResult};
use pg_query::protobuf::{ColumnRef, Node};
use pg_query::NodeEnum;

/// Join a `ColumnRef`'s name segments with `.`, preserving qualification
/// (e.g. `books.id` stays `books.id`). Fails if any segment is not a plain
/// name (a `*` segment belongs to [`is_wildcard`], not here).
pub fn qualified_name(column_ref: &ColumnRef) -> PipelineResult<String> {
    let mut parts = Vec::with_capacity(column_ref.fields.len());
    for field in &column_ref.fields {
        match field.node.as_ref() {
            Some(NodeEnum::String(s)) => parts.push(s.sval.clone()),
            _ => {
                return Err(PipelineError::unsupported(
                    "expected a plain column reference",
                ))
            }
        }
    }
    if parts.is_empty() {
        return Err(PipelineError::unsupported("empty column reference"));
    }
    Ok(parts.join("."))
}

/// Whether a `ColumnRef` is the bare `*` wildcard (optionally qualified,
/// e.g. `t.*`) with no other segments following the star.
pub fn is_wildcard(column_ref: &ColumnRef) -> bool {
    matches!(
        column_ref.fields.last().and_then(|n| n.node.as_ref()),
        Some(NodeEnum::AStar(_))
    )
}

/// Render `t.*` / `*` as PostgREST would expect it on the left of a target:
/// qualifier segments joined with `.`, `*` appended.
pub fn wildcard_name(column_ref: &ColumnRef) -> String {
    let mut parts = Vec::new();
    for field in &column_ref.fields {
        match field.node.as_ref() {
            Some(NodeEnum::String(s)) => parts.push(s.sval.clone()),
            Some(NodeEnum::AStar(_)) => parts.push("*".to_string()),
            _ => {}
        }
    }
    parts.join(".")
}

/// Extract the `ColumnRef` out of a generic node, failing otherwise.
pub fn as_column_ref(node: &Node) -> PipelineResult<&ColumnRef> {
    match node.node.as_ref() {
        Some(NodeEnum::ColumnRef(c)) => Ok(c),
        _ => Err(PipelineError::unsupported(
            "expected a plain column reference",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_ref(sql: &str) -> ColumnRef {
        let parsed = pg_query::parse(sql).unwrap();
        let stmt = parsed.protobuf.stmts.into_iter().next().unwrap();
        let select = match stmt.stmt.unwrap().node.unwrap() {
            NodeEnum::SelectStmt(s) => s,
            _ => panic!("expected select"),
        };
        let target = select.target_list.into_iter().next().unwrap();
        match target.node.unwrap() {
            NodeEnum::ResTarget(rt) => match rt.val.unwrap().node.unwrap() {
                NodeEnum::ColumnRef(c) => c,
                other => panic!("expected column ref, got {other:?}"),
            },
            _ => panic!("expected res target"),
        }
    }

    #[test]
    fn plain_name_has_no_dots() {
        let c = column_ref("select title from books");
        assert_eq!(qualified_name(&c).unwrap(), "title");
    }

    #[test]
    fn qualified_name_joins_segments() {
        let c = column_ref("select books.title from books");
        assert_eq!(qualified_name(&c).unwrap(), "books.title");
    }

    #[test]
    fn bare_star_is_detected_as_wildcard() {
        let c = column_ref("select * from books");
        assert!(is_wildcard(&c));
        assert_eq!(wildcard_name(&c), "*");
    }
}
