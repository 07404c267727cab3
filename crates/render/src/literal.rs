// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Rendering a single `Atom` as a PostgREST filter literal.
//!
//! PostgREST reserves the comma, parentheses, and double quote inside a
//! filter value's own text; a literal that happens to contain one of
//! those characters must be wrapped in double quotes (with internal
//! quotes and backslashes backslash-escaped) so the server can tell "this
//! comma is data" from "this comma separates an `in.()` list".

use sql_to_postgrest_ir::Atom;

/// Render one atom as it appears after an operator (`eq.42`, `in.(...)`'s
/// per-item literal, etc.), quoting it if its text contains syntax
/// characters.
pub fn render_atom(atom: &Atom) -> String {
    quote_if_needed(&atom.to_filter_literal())
}

/// Render an atom for the bare-keyword `is` operator (`null`, `true`,
/// `false`), which is never quoted.
pub fn render_is_keyword(atom: &Atom) -> String {
    atom.to_filter_literal()
}

fn quote_if_needed(raw: &str) -> String {
    if needs_quoting(raw) {
        let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    } else {
        raw.to_string()
    }
}

fn needs_quoting(raw: &str) -> bool {
    raw.is_empty() || raw.contains(['"', ',', '(', ')'])
}
