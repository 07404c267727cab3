// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Lowering `Statement` IR to an `HttpRequest`.
//!
//! Per statement kind: `Select` becomes a `GET` with a `select=`/filter/
//! `order=`/`limit=`/`offset=` query string, `Insert` a `POST` with a JSON
//! body, `Update` a `PATCH` with a JSON body, `Delete` a bodyless `DELETE`.
//! Filters and `RETURNING` both fold into the same query string that
//! `SELECT` uses (`RETURNING` becomes `select=`).

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::{Map, Value};
use sql_to_postgrest_ir::{Delete, Insert, Select, Sort, Statement, Target, Update};

use crate::error::{RenderError, RenderResult};
use crate::{filter, target};

/// Characters PostgREST's own query parameters never encode: the comma,
/// parentheses, and dot are filter/select/order syntax (see
/// `crate::literal` for how a literal's *own* commas/parens get escaped
/// instead of relying on percent-encoding), and `:`/`-`/`_`/`~`/`*` are
/// unreserved in a URL query string to begin with.
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'#')
    .add(b'[')
    .add(b']')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b';')
    .add(b'\'');

pub(crate) fn encode_param(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ENCODE_SET).to_string()
}

/// `GET`/`POST`/`PATCH`/`DELETE`: the only methods this subset ever emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// An order-preserving multimap of query parameters. Never sorted;
/// emission order is observable and deterministic output is required.
pub type Params = Vec<(String, String)>;

/// The rendered HTTP request: everything a transport needs to issue the
/// call, independent of any particular HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub params: Params,
    pub body: Option<Value>,
}

impl HttpRequest {
    /// `path` when `params` is empty, otherwise `path + "?" + encoded-params`.
    pub fn full_path(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = self
            .params
            .iter()
            .map(|(key, value)| format!("{}={}", encode_param(key), encode_param(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }
}

/// Render any `Statement` into its `HttpRequest`.
pub fn render(statement: &Statement) -> RenderResult<HttpRequest> {
    match statement {
        Statement::Select(select) => Ok(render_select(select)),
        Statement::Insert(insert) => render_insert(insert),
        Statement::Update(update) => Ok(render_update(update)),
        Statement::Delete(delete) => Ok(render_delete(delete)),
    }
}

fn render_select(select: &Select) -> HttpRequest {
    let mut params = Params::new();
    if !Target::is_canonical_wildcard(&select.targets) {
        params.push(("select".to_string(), target::render_targets(&select.targets)));
    }
    if let Some(f) = &select.filter {
        params.extend(filter::render_root(f));
    }
    if !select.sorts.is_empty() {
        params.push(("order".to_string(), render_sorts(&select.sorts)));
    }
    if let Some(limit) = &select.limit {
        if let Some(count) = limit.count {
            params.push(("limit".to_string(), count.to_string()));
        }
        if let Some(offset) = limit.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
    }
    HttpRequest {
        method: Method::Get,
        path: format!("/{}", select.from),
        params,
        body: None,
    }
}

fn render_sorts(sorts: &[Sort]) -> String {
    sorts.iter().map(render_sort).collect::<Vec<_>>().join(",")
}

fn render_sort(sort: &Sort) -> String {
    let mut rendered = sort.column.clone();
    if let Some(direction) = sort.direction {
        rendered.push('.');
        rendered.push_str(direction.as_str());
    }
    if let Some(nulls) = sort.nulls {
        rendered.push('.');
        rendered.push_str(nulls.as_str());
    }
    rendered
}

fn render_insert(insert: &Insert) -> RenderResult<HttpRequest> {
    if insert.columns.is_empty() && !insert.values.is_empty() {
        return Err(RenderError::unrepresentable(
            "INSERT with no explicit column list cannot be rendered as a JSON object body \
             without a schema to name its positional values",
        ));
    }

    let rows: Vec<Value> = insert
        .values
        .iter()
        .map(|row| {
            let mut object = Map::with_capacity(row.len());
            for (column, atom) in insert.columns.iter().zip(row.iter()) {
                object.insert(column.clone(), atom.to_json());
            }
            Value::Object(object)
        })
        .collect();

    let body = match rows.len() {
        1 => rows.into_iter().next().unwrap(),
        _ => Value::Array(rows),
    };

    let mut params = Params::new();
    push_returning(&mut params, &insert.returning);

    Ok(HttpRequest {
        method: Method::Post,
        path: format!("/{}", insert.into),
        params,
        body: Some(body),
    })
}

fn render_update(update: &Update) -> HttpRequest {
    let mut object = Map::with_capacity(update.set.len());
    for (column, atom) in &update.set {
        object.insert(column.clone(), atom.to_json());
    }

    let mut params = Params::new();
    push_returning(&mut params, &update.returning);
    if let Some(f) = &update.filter {
        params.extend(filter::render_root(f));
    }

    HttpRequest {
        method: Method::Patch,
        path: format!("/{}", update.table),
        params,
        body: Some(Value::Object(object)),
    }
}

fn render_delete(delete: &Delete) -> HttpRequest {
    let mut params = Params::new();
    push_returning(&mut params, &delete.returning);
    if let Some(f) = &delete.filter {
        params.extend(filter::render_root(f));
    }

    HttpRequest {
        method: Method::Delete,
        path: format!("/{}", delete.from),
        params,
        body: None,
    }
}

/// `RETURNING` renders as `select=c1,c2,...`; an empty list is equivalent
/// to no `RETURNING` at all and emits nothing.
fn push_returning(params: &mut Params, returning: &Option<Vec<String>>) {
    if let Some(columns) = returning {
        if !columns.is_empty() {
            params.push(("select".to_string(), columns.join(",")));
        }
    }
}
