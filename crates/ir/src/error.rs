// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Invariant violations raised by IR constructors.
//!
//! These are distinct from the pipeline's four public error kinds
//! (`ParsingError`/`UnsupportedError`/`UnimplementedError`/`RenderError`,
//! defined in `sql-to-postgrest-lowering`): an `IrBuildError` can only occur
//! if a processor tries to construct an IR value that violates one of the
//! invariants in the data model, which should never happen for a correctly
//! written processor. Processors convert this into `UnsupportedError` at
//! the call site rather than letting it escape as its own error kind.

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum IrBuildError {
    #[error("{what} must not be empty")]
    EmptyList { what: &'static str },

    #[error("INSERT row {row} has {actual} values, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        actual: usize,
        expected: usize,
    },

    #[error("INSERT rows are not uniform in length: row 0 has {first}, row {row} has {actual}")]
    NonUniformRows {
        first: usize,
        row: usize,
        actual: usize,
    },
}
