// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! A depth guard for the recursive filter-tree and target-tree walkers.
//!
//! Deliberately minimal: no error accumulator, no placeholder generator, no
//! source-location mapping, just the recursion bound, which exists purely
//! to turn unbounded recursion on pathological input into a typed error
//! instead of a stack overflow.

use crate::error::PipelineError;

pub struct RecursionGuard {
    depth: usize,
    max_depth: usize,
}

impl RecursionGuard {
    pub fn new() -> Self {
        Self::with_max_depth(128)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { depth: 0, max_depth }
    }

    /// Call before descending into a child node; returns an error instead of
    /// descending once `max_depth` is exceeded.
    pub fn enter(&mut self) -> Result<(), PipelineError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(PipelineError::unsupported(format!(
                "expression nesting exceeds the supported depth ({})",
                self.max_depth
            )));
        }
        Ok(())
    }

    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl Default for RecursionGuard {
    fn default() -> Self {
        Self::new()
    }
}
