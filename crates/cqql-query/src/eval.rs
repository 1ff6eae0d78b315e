//! Fuzzy evaluation of expanded formulas.
//!
//! Scores are read per atom, clamped to `[0,1]` and, for `db` attributes,
//! forced to a crisp `0` or `1`. Connectives use the algebraic product
//! t-norm and probabilistic sum:
//!
//! ```text
//! TRUE   => 1
//! FALSE  => 0
//! !x     => 1 - x
//! a & b  => a * b
//! a | b  => a + b - a*b
//! ```
//!
//! Products and probabilistic sums double-count shared evidence, so the
//! evaluator is meant to run on normalized formulas.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use cqql_core::formula::{FALSE, TRUE};
use cqql_core::{AttrType, AttributeNaming, AttributeSchema, Formula, ScoredObject};
use serde::Serialize;

use crate::error::{QueryError, Result};

/// Scores at or above this value make a `db` atom true.
pub const DB_THRESHOLD: f64 = 0.5;

/// Evaluate `formula` against one object's scores.
///
/// Missing atoms score `0`. Returns [`QueryError::UnsupportedNode`] if the
/// formula still contains weighted connectives.
pub fn evaluate<N>(
    formula: &Formula,
    scores: &BTreeMap<String, f64>,
    schema: &AttributeSchema,
    naming: &N,
) -> Result<f64>
where
    N: AttributeNaming + ?Sized,
{
    let value = match formula {
        Formula::Atom(name) => match name.as_str() {
            TRUE => 1.0,
            FALSE => 0.0,
            _ => atom_score(name, scores, schema, naming),
        },
        Formula::Not(sub) => 1.0 - evaluate(sub, scores, schema, naming)?,
        Formula::And(l, r) => {
            evaluate(l, scores, schema, naming)? * evaluate(r, scores, schema, naming)?
        }
        Formula::Or(l, r) => {
            let a = evaluate(l, scores, schema, naming)?;
            let b = evaluate(r, scores, schema, naming)?;
            a + b - a * b
        }
        Formula::WeightedAnd { .. } | Formula::WeightedOr { .. } => {
            return Err(QueryError::UnsupportedNode {
                stage: "evaluator",
                node: formula.kind(),
            });
        }
    };
    Ok(value.clamp(0.0, 1.0))
}

fn atom_score<N>(
    atom: &str,
    scores: &BTreeMap<String, f64>,
    schema: &AttributeSchema,
    naming: &N,
) -> f64
where
    N: AttributeNaming + ?Sized,
{
    let raw = scores.get(atom).copied().unwrap_or(0.0);
    let value = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };

    match schema.type_of(naming.attribute(atom)) {
        AttrType::Db if value >= DB_THRESHOLD => 1.0,
        AttrType::Db => 0.0,
        AttrType::Prox | AttrType::Text => value,
    }
}

/// An object name with its match score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked {
    pub name: String,
    pub score: f64,
}

/// Score every object and sort by descending score.
///
/// Objects with equal scores keep their input order.
pub fn rank<N>(
    formula: &Formula,
    objects: &[ScoredObject],
    schema: &AttributeSchema,
    naming: &N,
) -> Result<Vec<Ranked>>
where
    N: AttributeNaming + ?Sized,
{
    let mut ranked = objects
        .iter()
        .map(|obj| {
            Ok(Ranked {
                name: obj.name.clone(),
                score: evaluate(formula, &obj.scores, schema, naming)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(ranked)
}
