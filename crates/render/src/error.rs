// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The renderer's half of the pipeline's error story.
//!
//! `sql-to-postgrest-lowering` owns `ParsingError`/`UnsupportedError`/
//! `UnimplementedError`; those can only occur while building IR. This
//! crate only ever raises `RenderError`: the IR is well-formed (it could
//! not have been constructed otherwise) but this renderer specifically
//! cannot express it. In practice that is rare, since the HTTP renderer
//! is built to cover every shape the IR can hold; it exists for future
//! renderers with narrower reach.

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("{message}")]
    Unrepresentable { message: String },
}

impl RenderError {
    pub fn unrepresentable(message: impl Into<String>) -> Self {
        RenderError::Unrepresentable {
            message: message.into(),
        }
    }
}
