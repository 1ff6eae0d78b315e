//! Conversion of expanded formulas to disjunctive normal form.
//!
//! Negations are pushed down to the atoms (De Morgan, double negation), then
//! conjunctions are distributed over disjunctions. [`Dnf`] keeps terms
//! deduplicated, drops contradictory terms and absorbs supersets, so the
//! constants fall out naturally: no surviving terms is `FALSE`, an empty
//! term is `TRUE`.

use cqql_core::{Dnf, Formula, Literal};

use crate::error::{QueryError, Result};

/// Convert an expanded formula to DNF.
///
/// Fails with [`QueryError::UnsupportedNode`] on `WAND`/`WOR` nodes.
pub fn to_dnf(formula: &Formula) -> Result<Dnf> {
    convert(formula, false)
}

fn convert(formula: &Formula, negated: bool) -> Result<Dnf> {
    match formula {
        Formula::Atom(name) => Ok(Dnf::from_literal(Literal {
            atom: name.clone(),
            negated,
        })),
        Formula::Not(sub) => convert(sub, !negated),
        Formula::And(l, r) if !negated => Ok(convert(l, false)?.and(&convert(r, false)?)),
        Formula::And(l, r) => Ok(convert(l, true)?.or(&convert(r, true)?)),
        Formula::Or(l, r) if !negated => Ok(convert(l, false)?.or(&convert(r, false)?)),
        Formula::Or(l, r) => Ok(convert(l, true)?.and(&convert(r, true)?)),
        Formula::WeightedAnd { .. } | Formula::WeightedOr { .. } => {
            Err(QueryError::UnsupportedNode {
                stage: "DNF conversion",
                node: formula.kind(),
            })
        }
    }
}
