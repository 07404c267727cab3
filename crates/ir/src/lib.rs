// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sql-to-postgrest: Intermediate Representation
//!
//! This crate provides the `Statement` IR: a tagged, renderer-agnostic
//! representation of the subset of SQL this pipeline understands
//! (`SELECT`/`INSERT`/`UPDATE`/`DELETE`). It is produced by
//! `sql-to-postgrest-lowering` and consumed by `sql-to-postgrest-render`;
//! this crate knows about neither.
//!
//! Every invariant named in the data model (non-empty target lists,
//! non-empty logical-filter children, uniform INSERT row widths, non-empty
//! UPDATE SET clauses) is enforced at construction time, not by a
//! separate validation pass over an already-built value.

pub mod atom;
pub mod error;
pub mod filter;
pub mod sort;
pub mod statement;
pub mod target;

pub use atom::Atom;
pub use error::IrBuildError;
pub use filter::{ColumnFilter, Filter, FilterValue, LogicalFilter, LogicalOperator, Operator};
pub use sort::{Direction, Nulls, Sort};
pub use statement::{Delete, Insert, Limit, Select, Statement, Update};
pub use target::{AggregateFunction, Target};
