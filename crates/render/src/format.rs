// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Two thin string emitters over `HttpRequest`: `format_http` for a raw
//! wire-style request, `format_curl` for a `curl` invocation. Both take a
//! base URL whose path the request's `path` is appended to.

use crate::http::{encode_param, HttpRequest, Method};

/// Render `request` as a wire-style HTTP/1.1 request against `base_url`.
pub fn format_http(request: &HttpRequest, base_url: &str) -> String {
    let (host, path_prefix) = split_base_url(base_url);
    let full_path = format!("{path_prefix}{}", request.full_path());
    let request_line = format!("{} {full_path} HTTP/1.1", request.method.as_str());

    let mut lines = vec![request_line, format!("Host: {host}")];
    if let Some(body) = &request.body {
        lines.push("Content-Type: application/json".to_string());
        lines.push(String::new());
        lines.push(body.to_string());
    } else {
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Render `request` as a multi-line `curl` invocation against `base_url`.
pub fn format_curl(request: &HttpRequest, base_url: &str) -> String {
    let (origin, path_prefix) = split_origin_and_prefix(base_url);
    let url = format!("{origin}{path_prefix}{}", request.path);

    let mut lines = vec![format!("curl \"{url}\"")];

    if request.method != Method::Get {
        lines.push(format!("-X {}", request.method.as_str()));
    }
    if request.method == Method::Get && !request.params.is_empty() {
        lines.push("-G".to_string());
    }
    for (key, value) in &request.params {
        lines.push(format!("-d \"{key}={}\"", encode_param(value)));
    }
    if let Some(body) = &request.body {
        lines.push("-H \"Content-Type: application/json\"".to_string());
        lines.push(format!("-d '{}'", body));
    }

    lines.join(" \\\n  ")
}

/// Split a base URL into its bare host (no scheme, for a `Host:` header)
/// and its path prefix (whatever follows the host, `""` if none).
fn split_base_url(base_url: &str) -> (String, String) {
    let (scheme_and_host, path_prefix) = split_origin_and_prefix(base_url);
    let host = scheme_and_host
        .strip_prefix("https://")
        .or_else(|| scheme_and_host.strip_prefix("http://"))
        .unwrap_or(&scheme_and_host)
        .to_string();
    (host, path_prefix)
}

/// Split a base URL into its origin (`scheme://host`, no trailing slash)
/// and its path prefix (whatever follows the host, `""` if none).
fn split_origin_and_prefix(base_url: &str) -> (String, String) {
    let trimmed = base_url.trim_end_matches('/');
    let (scheme, rest) = trimmed
        .split_once("://")
        .map(|(scheme, rest)| (format!("{scheme}://"), rest))
        .unwrap_or_else(|| (String::new(), trimmed));
    match rest.split_once('/') {
        Some((host, path)) => (format!("{scheme}{host}"), format!("/{path}")),
        None => (format!("{scheme}{rest}"), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Params;

    fn get_request(path: &str, params: Params) -> HttpRequest {
        HttpRequest {
            method: Method::Get,
            path: path.to_string(),
            params,
            body: None,
        }
    }

    #[test]
    fn format_http_get_has_no_content_type_or_body() {
        let request = get_request("/books", vec![]);
        let rendered = format_http(&request, "http://localhost:3000");
        assert_eq!(
            rendered,
            "GET /books HTTP/1.1\nHost: localhost:3000\n"
        );
    }

    #[test]
    fn format_http_post_includes_content_type_and_body() {
        let request = HttpRequest {
            method: Method::Post,
            path: "/books".to_string(),
            params: vec![],
            body: Some(serde_json::json!({"title": "Dune"})),
        };
        let rendered = format_http(&request, "http://localhost:3000");
        assert!(rendered.contains("POST /books HTTP/1.1"));
        assert!(rendered.contains("Content-Type: application/json"));
        assert!(rendered.ends_with("{\"title\":\"Dune\"}"));
    }

    #[test]
    fn format_curl_get_with_params_uses_dash_g() {
        let request = get_request("/books", vec![("id".to_string(), "eq.1".to_string())]);
        let rendered = format_curl(&request, "http://localhost:3000");
        assert!(rendered.contains("-G"));
        assert!(rendered.contains("-d \"id=eq.1\""));
    }

    #[test]
    fn format_curl_percent_encodes_special_characters_in_param_values() {
        let request = get_request(
            "/books",
            vec![("title".to_string(), "eq.Foo & Bar/100%".to_string())],
        );
        let rendered = format_curl(&request, "http://localhost:3000");
        assert!(rendered.contains("-d \"title=eq.Foo%20%26%20Bar%2F100%25\""));
        assert!(!rendered.contains('&'));
    }

    #[test]
    fn format_curl_delete_uses_dash_x() {
        let request = HttpRequest {
            method: Method::Delete,
            path: "/books".to_string(),
            params: vec![("id".to_string(), "eq.1".to_string())],
            body: None,
        };
        let rendered = format_curl(&request, "http://localhost:3000");
        assert!(rendered.contains("-X DELETE"));
    }

    #[test]
    fn format_curl_post_includes_body_and_content_type() {
        let request = HttpRequest {
            method: Method::Post,
            path: "/books".to_string(),
            params: vec![],
            body: Some(serde_json::json!({"title": "Dune"})),
        };
        let rendered = format_curl(&request, "http://localhost:3000");
        assert!(rendered.contains("-H \"Content-Type: application/json\""));
        assert!(rendered.contains("-d '{\"title\":\"Dune\"}'"));
    }
}
