// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The filter tree.
//!
//! A `Filter` is a strict tree (no sharing) of `ColumnFilter` leaves and
//! `LogicalFilter` interior nodes. Negation is carried as a `negate: bool`
//! field on every node rather than as a separate wrapper node; this is
//! what lets the root-flattening routine in the renderer stay a simple,
//! local decision ("is this node a non-negated `and`?") instead of having
//! to look through an arbitrary stack of NOT wrappers first.

use crate::error::IrBuildError;
use serde::{Deserialize, Serialize};

/// A column-level or boolean-combinator filter node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    Column(ColumnFilter),
    Logical(LogicalFilter),
}

impl Filter {
    /// Whether this node's own `negate` flag is set.
    pub fn is_negated(&self) -> bool {
        match self {
            Filter::Column(c) => c.negate,
            Filter::Logical(l) => l.negate,
        }
    }

    /// Flip this node's `negate` flag in place. Used to absorb a SQL `NOT`
    /// into the node it wraps instead of introducing a wrapper node.
    pub fn toggle_negate(&mut self) {
        match self {
            Filter::Column(c) => c.negate = !c.negate,
            Filter::Logical(l) => l.negate = !l.negate,
        }
    }
}

/// A predicate on a single (possibly-qualified) column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub negate: bool,
    pub column: String,
    pub operator: Operator,
    pub value: FilterValue,
}

impl ColumnFilter {
    pub fn new(column: impl Into<String>, operator: Operator, value: FilterValue) -> Self {
        Self {
            negate: false,
            column: column.into(),
            operator,
            value,
        }
    }
}

/// The value side of a `ColumnFilter`: either a single atom or a list
/// (only meaningful for `in`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
    Atom(crate::atom::Atom),
    List(Vec<crate::atom::Atom>),
}

/// Every operator in the restricted subset's filter vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    Ilike,
    Is,
    In,
    Fts,
    Plfts,
    Phfts,
    Wfts,
    Cs,
    Cd,
    Ov,
    Sl,
    Sr,
    Nxr,
    Nxl,
    Adj,
}

impl Operator {
    /// The PostgREST wire name for this operator (`eq`, `gte`, `in`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Like => "like",
            Operator::Ilike => "ilike",
            Operator::Is => "is",
            Operator::In => "in",
            Operator::Fts => "fts",
            Operator::Plfts => "plfts",
            Operator::Phfts => "phfts",
            Operator::Wfts => "wfts",
            Operator::Cs => "cs",
            Operator::Cd => "cd",
            Operator::Ov => "ov",
            Operator::Sl => "sl",
            Operator::Sr => "sr",
            Operator::Nxr => "nxr",
            Operator::Nxl => "nxl",
            Operator::Adj => "adj",
        }
    }

    /// The "basic operator" subset permitted in UPDATE/DELETE predicates.
    pub const BASIC: [Operator; 6] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
    ];

    pub fn is_basic(self) -> bool {
        Self::BASIC.contains(&self)
    }
}

/// `AND`/`OR` over a non-empty ordered list of children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalFilter {
    pub negate: bool,
    pub operator: LogicalOperator,
    pub values: Vec<Filter>,
}

impl LogicalFilter {
    /// Construct a logical filter, enforcing the non-empty-children invariant.
    pub fn new(
        operator: LogicalOperator,
        values: Vec<Filter>,
    ) -> Result<Self, IrBuildError> {
        if values.is_empty() {
            return Err(IrBuildError::EmptyList {
                what: "LogicalFilter.values",
            });
        }
        Ok(Self {
            negate: false,
            operator,
            values,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
        }
    }
}
