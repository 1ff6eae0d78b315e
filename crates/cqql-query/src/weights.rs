//! Elimination of the weighted connectives.
//!
//! ```text
//! WAND(t1,t2,L,R)  =>  (L | !t1) & (R | !t2)
//! WOR(t1,t2,L,R)   =>  (L & t1) | (R & t2)
//! ```
//!
//! The result never contains `WeightedAnd` / `WeightedOr` nodes.

use cqql_core::Formula;

/// Recursively rewrite every weighted node into plain boolean connectives.
pub fn expand(formula: &Formula) -> Formula {
    match formula {
        Formula::Atom(name) => Formula::Atom(name.clone()),
        Formula::Not(sub) => Formula::not(expand(sub)),
        Formula::And(l, r) => Formula::and(expand(l), expand(r)),
        Formula::Or(l, r) => Formula::or(expand(l), expand(r)),
        Formula::WeightedAnd {
            theta1,
            theta2,
            left,
            right,
        } => Formula::and(
            Formula::or(expand(left), Formula::not(Formula::atom(theta1.clone()))),
            Formula::or(expand(right), Formula::not(Formula::atom(theta2.clone()))),
        ),
        Formula::WeightedOr {
            theta1,
            theta2,
            left,
            right,
        } => Formula::or(
            Formula::and(expand(left), Formula::atom(theta1.clone())),
            Formula::and(expand(right), Formula::atom(theta2.clone())),
        ),
    }
}
