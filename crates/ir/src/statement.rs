// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The top-level `Statement` sum type and its four variants.
//!
//! A `Statement` is produced exactly once by a processor and consumed
//! exactly once by a renderer; nothing in this crate mutates one after
//! construction. Every invariant named in the data model is enforced by the
//! constructors below rather than by a separate validation pass, so a
//! `Statement` that exists at all is guaranteed well-formed.

use crate::atom::Atom;
use crate::error::IrBuildError;
use crate::filter::Filter;
use crate::sort::Sort;
use crate::target::Target;
use serde::{Deserialize, Serialize};

/// The IR handed from the processor to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

/// `LIMIT`/`OFFSET`, each an independent non-negative count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Limit {
    pub count: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub from: String,
    pub targets: Vec<Target>,
    pub filter: Option<Filter>,
    pub sorts: Vec<Sort>,
    pub limit: Option<Limit>,
}

impl Select {
    /// Construct a `Select`, enforcing that `targets` is non-empty.
    pub fn new(from: impl Into<String>, targets: Vec<Target>) -> Result<Self, IrBuildError> {
        if targets.is_empty() {
            return Err(IrBuildError::EmptyList {
                what: "Select.targets",
            });
        }
        Ok(Self {
            from: from.into(),
            targets,
            filter: None,
            sorts: Vec::new(),
            limit: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    pub into: String,
    pub columns: Vec<String>,
    pub values: Vec<Vec<Atom>>,
    pub returning: Option<Vec<String>>,
}

impl Insert {
    /// Construct an `Insert`, enforcing uniform row width and, when
    /// `columns` is non-empty, that every row matches its length.
    pub fn new(
        into: impl Into<String>,
        columns: Vec<String>,
        values: Vec<Vec<Atom>>,
    ) -> Result<Self, IrBuildError> {
        let expected = if !columns.is_empty() {
            Some(columns.len())
        } else {
            values.first().map(|row| row.len())
        };
        if let Some(expected) = expected {
            for (i, row) in values.iter().enumerate() {
                if row.len() != expected {
                    return if !columns.is_empty() {
                        Err(IrBuildError::RowWidthMismatch {
                            row: i,
                            actual: row.len(),
                            expected,
                        })
                    } else {
                        Err(IrBuildError::NonUniformRows {
                            first: expected,
                            row: i,
                            actual: row.len(),
                        })
                    };
                }
            }
        }
        Ok(Self {
            into: into.into(),
            columns,
            values,
            returning: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub table: String,
    pub set: Vec<(String, Atom)>,
    pub filter: Option<Filter>,
    pub returning: Option<Vec<String>>,
}

impl Update {
    /// Construct an `Update`, enforcing that `set` is non-empty.
    pub fn new(table: impl Into<String>, set: Vec<(String, Atom)>) -> Result<Self, IrBuildError> {
        if set.is_empty() {
            return Err(IrBuildError::EmptyList { what: "Update.set" });
        }
        Ok(Self {
            table: table.into(),
            set,
            filter: None,
            returning: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub from: String,
    pub filter: Option<Filter>,
    pub returning: Option<Vec<String>>,
}

impl Delete {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            filter: None,
            returning: None,
        }
    }
}
