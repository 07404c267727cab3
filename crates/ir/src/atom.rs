// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Scalar literal values that can appear in VALUES rows, SET assignments,
//! and filter predicates.

use serde::{Deserialize, Serialize};

/// A scalar literal: a string, a number, a boolean, or `NULL`.
///
/// This is the only value shape the subset permits on the right-hand side of
/// a predicate, in a VALUES row, or in a SET assignment; anything else
/// (an expression, a sub-select, a column reference) is rejected by the
/// processor before an `Atom` is ever constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Atom {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl Atom {
    /// Render the atom as it appears in a PostgREST filter literal
    /// (`eq.42`, `eq.true`, `eq.null`, `eq.hello`).
    pub fn to_filter_literal(&self) -> String {
        match self {
            Atom::String(s) => s.clone(),
            Atom::Number(n) => format_number(*n),
            Atom::Bool(b) => b.to_string(),
            Atom::Null => "null".to_string(),
        }
    }

    /// Render the atom as a `serde_json::Value`, for request bodies.
    ///
    /// An integral value renders as a JSON integer, not a float: `1999.0`
    /// must serialize as `1999`, matching what the parser handed in before
    /// `A_Const`'s `Ival`/`Fval` distinction was folded into one `Number`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Atom::String(s) => serde_json::Value::String(s.clone()),
            Atom::Number(n) => number_to_json(*n),
            Atom::Bool(b) => serde_json::Value::Bool(*b),
            Atom::Null => serde_json::Value::Null,
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        serde_json::Value::Number(serde_json::Number::from(n as i64))
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

/// Integral numbers render without a trailing `.0`; everything else renders
/// with Rust's default float formatting.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_decimal() {
        assert_eq!(Atom::Number(1999.0).to_filter_literal(), "1999");
        assert_eq!(Atom::Number(-3.0).to_filter_literal(), "-3");
    }

    #[test]
    fn fractional_numbers_keep_decimal() {
        assert_eq!(Atom::Number(4.5).to_filter_literal(), "4.5");
    }

    #[test]
    fn bool_and_null_render_bare() {
        assert_eq!(Atom::Bool(true).to_filter_literal(), "true");
        assert_eq!(Atom::Null.to_filter_literal(), "null");
    }

    #[test]
    fn string_round_trips_to_json() {
        assert_eq!(
            Atom::String("asimov".into()).to_json(),
            serde_json::json!("asimov")
        );
    }

    #[test]
    fn integral_numbers_serialize_as_json_integers() {
        assert_eq!(Atom::Number(1999.0).to_json(), serde_json::json!(1999));
        assert_eq!(Atom::Number(-3.0).to_json(), serde_json::json!(-3));
    }

    #[test]
    fn fractional_numbers_serialize_as_json_floats() {
        assert_eq!(Atom::Number(4.5).to_json(), serde_json::json!(4.5));
    }
}
