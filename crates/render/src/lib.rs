// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sql-to-postgrest: render
//!
//! Lowers `Statement` IR into a PostgREST-shaped [`HttpRequest`], and
//! offers two thin string emitters over that request
//! ([`format::format_http`], [`format::format_curl`]) plus a minimal
//! client-code renderer ([`codesnippet::javascript`]). This crate knows
//! nothing about `pg_query` or parse trees; it consumes only the IR that
//! `sql-to-postgrest-lowering` produces.
//!
//! The one non-trivial algorithm here is [`filter::render_root`], the
//! root-flattening routine: a non-negated `AND` at the top of a filter
//! tree is rendered as separate top-level query parameters rather than a
//! single `and=(...)` parameter. See its doc comment for why.

pub mod codesnippet;
pub mod error;
pub mod filter;
pub mod format;
pub mod http;
mod literal;
pub mod target;

pub use error::{RenderError, RenderResult};
pub use format::{format_curl, format_http};
pub use http::{render, HttpRequest, Method, Params};
