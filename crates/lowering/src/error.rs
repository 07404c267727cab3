// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The four typed error kinds the pipeline can raise.
//!
//! There is no partial-success outcome here: every fallible step returns
//! `Result<_, PipelineError>` and the first offending node aborts the whole
//! statement. There is no accumulator for a list of errors and no
//! graceful-degradation state; that concept has no place in a pipeline that
//! must never hand back a partial IR.

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum PipelineError {
    /// The SQL text was syntactically invalid.
    #[error("{message}")]
    ParsingError {
        message: String,
        cursor_position: usize,
        hint: String,
    },

    /// The SQL was valid but uses a construct outside the supported subset.
    #[error("{message}")]
    UnsupportedError { message: String },

    /// The SQL uses a construct in the intended subset that is not yet built.
    #[error("{message}")]
    UnimplementedError { message: String },

    /// The IR is well-formed but the chosen renderer cannot express it.
    #[error("{message}")]
    RenderError { message: String },
}

impl PipelineError {
    pub fn unsupported(message: impl Into<String>) -> Self {
        PipelineError::UnsupportedError {
            message: message.into(),
        }
    }

    pub fn unimplemented(message: impl Into<String>) -> Self {
        PipelineError::UnimplementedError {
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        PipelineError::RenderError {
            message: message.into(),
        }
    }
}

impl From<sql_to_postgrest_ir::IrBuildError> for PipelineError {
    /// An `IrBuildError` can only occur when a processor tries to build an
    /// IR value that violates one of the data model's invariants from
    /// otherwise-valid input (e.g. an INSERT whose rows disagree in width).
    /// That is a statement the subset does not support, so it is reported
    /// as `UnsupportedError`, not surfaced as a fifth error kind.
    fn from(err: sql_to_postgrest_ir::IrBuildError) -> Self {
        PipelineError::UnsupportedError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_error_displays_its_message_only() {
        let err = PipelineError::ParsingError {
            message: "syntax error at or near \"FORM\"".into(),
            cursor_position: 14,
            hint: "did you mean FROM?".into(),
        };
        assert_eq!(err.to_string(), "syntax error at or near \"FORM\"");
    }

    #[test]
    fn ir_build_error_converts_to_unsupported() {
        let ir_err = sql_to_postgrest_ir::IrBuildError::EmptyList { what: "Update.set" };
        let pipeline_err: PipelineError = ir_err.into();
        assert!(matches!(
            pipeline_err,
            PipelineError::UnsupportedError { .. }
        ));
    }
}
