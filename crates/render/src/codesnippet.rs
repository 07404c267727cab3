// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! A client-code renderer. Out of scope for the core per spec.md's "Out of
//! scope" note ("the client-code string-building renderer (described only
//! at the boundary)"); this module exists so the pipeline has *a* second
//! consumer of `HttpRequest` to prove the IR is renderer-agnostic, not as a
//! fully developed code-generation feature. It covers exactly one target (a
//! `supabase-js`-style builder chain) and does not attempt to cover every
//! client library a real tool would offer.

use crate::http::{HttpRequest, Method};

/// Render `request` as a single `supabase-js` builder-chain expression,
/// e.g. `client.from('books').select('title').eq('id', 1)`. `base_url` is
/// accepted for symmetry with the other renderers but unused: a
/// `supabase-js` client already carries its own base URL.
pub fn javascript(request: &HttpRequest, _base_url: &str) -> String {
    let table = request.path.trim_start_matches('/');
    let mut chain = format!("client.from('{}')", js_string(table));

    match request.method {
        Method::Get => {
            chain.push_str(&select_call(request));
            for (key, value) in &request.params {
                if matches!(key.as_str(), "select" | "order" | "limit" | "offset") {
                    continue;
                }
                chain.push_str(&filter_call(key, value));
            }
            chain.push_str(&order_calls(request));
            chain.push_str(&range_call(request));
        }
        Method::Post => {
            chain.push_str(&format!(".insert({})", body_literal(request)));
            chain.push_str(&select_call(request));
        }
        Method::Patch => {
            chain.push_str(&format!(".update({})", body_literal(request)));
            for (key, value) in &request.params {
                if key != "select" {
                    chain.push_str(&filter_call(key, value));
                }
            }
            chain.push_str(&select_call(request));
        }
        Method::Delete => {
            chain.push_str(".delete()");
            for (key, value) in &request.params {
                if key != "select" {
                    chain.push_str(&filter_call(key, value));
                }
            }
            chain.push_str(&select_call(request));
        }
    }

    format!("{chain};")
}

fn select_call(request: &HttpRequest) -> String {
    match request.params.iter().find(|(key, _)| key == "select") {
        Some((_, columns)) => format!(".select('{}')", js_string(columns)),
        None if request.method == Method::Get => ".select('*')".to_string(),
        None => String::new(),
    }
}

fn body_literal(request: &HttpRequest) -> String {
    request
        .body
        .as_ref()
        .map(|body| body.to_string())
        .unwrap_or_else(|| "{}".to_string())
}

/// Render one query parameter as a builder-chain call. `and`/`or` carry raw
/// PostgREST logical-tree syntax and map to the generic `.filter()` escape
/// hatch; everything else is `column=[not.]op.value` and maps to the named
/// shortcut (`.eq()`, `.not('col', 'eq', value)`, …).
fn filter_call(key: &str, value: &str) -> String {
    if key == "and" || key == "or" {
        return format!(".filter('{key}', '{}')", js_string(value));
    }

    let (negate, rest) = match value.strip_prefix("not.") {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let Some((op, arg)) = rest.split_once('.') else {
        return format!(".filter('{}', '{}')", js_string(key), js_string(value));
    };
    let js_op = js_operator_name(op);
    let arg = js_argument(op, arg);

    if negate {
        format!(".not('{}', '{js_op}', {arg})", js_string(key))
    } else {
        format!(".{js_op}('{}', {arg})", js_string(key))
    }
}

fn js_operator_name(op: &str) -> &'static str {
    match op {
        "eq" => "eq",
        "neq" => "neq",
        "gt" => "gt",
        "gte" => "gte",
        "lt" => "lt",
        "lte" => "lte",
        "like" => "like",
        "ilike" => "ilike",
        "is" => "is",
        "in" => "in",
        _ => "filter",
    }
}

/// Turn a raw PostgREST-syntax operand into a JS literal: `in.(1,2,3)`'s
/// parenthesized list becomes `[1,2,3]`, bare `true`/`false`/`null` and
/// numbers pass through unquoted, anything else is a quoted JS string.
fn js_argument(op: &str, raw: &str) -> String {
    if op == "in" {
        let inner = raw.trim_start_matches('(').trim_end_matches(')');
        let items = inner
            .split(',')
            .filter(|s| !s.is_empty())
            .map(js_scalar)
            .collect::<Vec<_>>()
            .join(", ");
        return format!("[{items}]");
    }
    js_scalar(raw)
}

fn js_scalar(raw: &str) -> String {
    if raw == "true" || raw == "false" || raw == "null" {
        return raw.to_string();
    }
    if raw.parse::<f64>().is_ok() {
        return raw.to_string();
    }
    format!("'{}'", js_string(raw))
}

fn order_calls(request: &HttpRequest) -> String {
    let Some((_, value)) = request.params.iter().find(|(key, _)| key == "order") else {
        return String::new();
    };
    value
        .split(',')
        .map(|entry| {
            let mut parts = entry.split('.');
            let column = parts.next().unwrap_or(entry);
            let mut ascending = true;
            let mut nulls_first: Option<bool> = None;
            for part in parts {
                match part {
                    "asc" => ascending = true,
                    "desc" => ascending = false,
                    "nullsfirst" => nulls_first = Some(true),
                    "nullslast" => nulls_first = Some(false),
                    _ => {}
                }
            }
            match nulls_first {
                Some(first) => format!(
                    ".order('{}', {{ ascending: {ascending}, nullsFirst: {first} }})",
                    js_string(column)
                ),
                None => format!(".order('{}', {{ ascending: {ascending} }})", js_string(column)),
            }
        })
        .collect()
}

fn range_call(request: &HttpRequest) -> String {
    let limit = request
        .params
        .iter()
        .find(|(key, _)| key == "limit")
        .and_then(|(_, v)| v.parse::<u64>().ok());
    let offset = request
        .params
        .iter()
        .find(|(key, _)| key == "offset")
        .and_then(|(_, v)| v.parse::<u64>().ok());

    match (limit, offset) {
        (Some(limit), Some(offset)) => {
            format!(".range({offset}, {})", offset + limit.saturating_sub(1))
        }
        (Some(limit), None) => format!(".limit({limit})"),
        (None, Some(offset)) => format!(".range({offset}, {offset})"),
        (None, None) => String::new(),
    }
}

fn js_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
