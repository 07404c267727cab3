// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Lowering a single constant parse-tree node into an `Atom`.

use crate::error::{PipelineError, PipelineResult};
use pg_query::protobuf::a_const::Val;
use pg_query::protobuf::Node;
use pg_query::NodeEnum;
use sql_to_postgrest_ir::Atom;

/// Lower a node that is required to be a literal constant. Anything else
/// (a column reference, a function call, a sub-select, an operator
/// expression) is not a constant and fails `UnsupportedError`.
pub fn node_to_atom(node: &Node) -> PipelineResult<Atom> {
    match node.node.as_ref() {
        Some(NodeEnum::AConst(c)) => {
            if c.isnull {
                return Ok(Atom::Null);
            }
            match &c.val {
                Some(Val::Ival(i)) => Ok(Atom::Number(i.ival as f64)),
                Some(Val::Fval(f)) => f
                    .fval
                    .parse::<f64>()
                    .map(Atom::Number)
                    .map_err(|_| PipelineError::unsupported(format!("invalid numeric literal '{}'", f.fval))),
                Some(Val::Boolval(b)) => Ok(Atom::Bool(b.boolval)),
                Some(Val::Sval(s)) => Ok(Atom::String(s.sval.clone())),
                Some(Val::Bsval(_)) | None => Ok(Atom::Null),
            }
        }
        // `NULL::int`, `'x'::text`, etc.; the cast itself is not part of
        // the value, only constants behind a cast are still constants.
        Some(NodeEnum::TypeCast(cast)) => {
            let inner = cast
                .arg
                .as_deref()
                .ok_or_else(|| PipelineError::unsupported("cast with no argument"))?;
            node_to_atom(inner)
        }
        _ => Err(PipelineError::unsupported(
            "expected a literal value; expressions are not supported here",
        )),
    }
}
