// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The `sql-to-postgrest` binary: a thin CLI wrapper over the lowering and
//! render crates. Reads one SQL statement (as an argument or from stdin),
//! runs it through the pipeline, and prints the chosen rendering.
//!
//! This binary is an external collaborator per spec.md's "Out of scope"
//! note ("the CLI/library wrapper that calls into the pipeline"); it owns
//! no pipeline logic of its own, only argument parsing and output
//! formatting.

use std::io::{IsTerminal, Read};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use sql_to_postgrest_lowering::{translate, PipelineError};
use sql_to_postgrest_render::{format_curl, format_http, render, RenderError};

#[derive(Parser)]
#[command(
    name = "sql-to-postgrest",
    about = "Translate a SQL statement into an equivalent PostgREST request",
    version
)]
struct Cli {
    /// The SQL statement to translate. Reads from stdin when omitted.
    sql: Option<String>,

    /// Base URL the rendered request is issued against.
    #[arg(long, default_value = "http://localhost:3000")]
    base_url: String,

    /// Output shape for the rendered request.
    #[arg(long, value_enum, default_value_t = OutputFormat::Http)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// A raw HTTP/1.1 request.
    Http,
    /// A `curl` invocation.
    Curl,
    /// A JavaScript `fetch` snippet.
    Js,
    /// The `HttpRequest` record itself, as JSON.
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let sql = match read_sql(cli.sql) {
        Ok(sql) => sql,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    match run(&sql, &cli.base_url, cli.format) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn read_sql(arg: Option<String>) -> Result<String, String> {
    if let Some(sql) = arg {
        return Ok(sql);
    }
    if std::io::stdin().is_terminal() {
        return Err("no SQL provided: pass it as an argument or pipe it on stdin".to_string());
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed to read SQL from stdin: {err}"))?;
    Ok(buffer)
}

fn run(sql: &str, base_url: &str, format: OutputFormat) -> Result<String, String> {
    let statement = translate(sql).map_err(describe_pipeline_error)?;
    let request = render(&statement).map_err(describe_render_error)?;

    Ok(match format {
        OutputFormat::Http => format_http(&request, base_url),
        OutputFormat::Curl => format_curl(&request, base_url),
        OutputFormat::Js => sql_to_postgrest_render::codesnippet::javascript(&request, base_url),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&serde_json::json!({
                "method": request.method.as_str(),
                "path": request.path,
                "fullPath": request.full_path(),
                "params": request.params,
                "body": request.body,
            }))
            .expect("HttpRequest always serializes")
        }
    })
}

fn describe_pipeline_error(err: PipelineError) -> String {
    match err {
        PipelineError::ParsingError {
            message,
            cursor_position,
            hint,
        } => format!("{message} (at byte {cursor_position}): {hint}"),
        other => other.to_string(),
    }
}

fn describe_render_error(err: RenderError) -> String {
    err.to_string()
}
