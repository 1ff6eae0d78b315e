//! Removal of ordinal overlaps.
//!
//! Two DNF terms overlap on an ordinal attribute when they make different
//! claims about it (`price__low` in one term, `price__high` in another) while
//! both can hold at once. The fuzzy evaluator's probabilistic sum would then
//! double-count objects that partially match both buckets, so the normalizer
//! case-splits the formula until no such pair remains:
//!
//! 1. convert to DNF;
//! 2. collect, per ordinal attribute, the distinct literal signatures across
//!    all terms; an attribute with two or more is overlapping;
//! 3. pick the first literal (canonical term order, then literal order) whose
//!    attribute overlaps and split on its atom `o`:
//!    `e => (o & e1) | (!o & e2)`, where `e1` keeps the terms compatible with
//!    `o` (with `o` removed) and `e2` those compatible with `!o`;
//! 4. normalize `e1` and `e2` recursively and recombine.
//!
//! The recursion depth is bounded by [`NormalizeOptions::max_depth`]; once it
//! is exhausted the current DNF is returned as is.

use std::collections::{BTreeMap, BTreeSet};

use cqql_core::{AttributeNaming, Dnf, Formula, Literal, Term};
use tracing::{debug, warn};

use crate::dnf::to_dnf;
use crate::error::{QueryError, Result};

/// Default bound on split recursion.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Settings for [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Attributes whose buckets are case-split.
    pub ordinal_attrs: BTreeSet<String>,
    /// Maximum split recursion depth.
    pub max_depth: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            ordinal_attrs: BTreeSet::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl NormalizeOptions {
    pub fn new<I, S>(ordinal_attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ordinal_attrs: ordinal_attrs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn is_ordinal(&self, attr: &str) -> bool {
        self.ordinal_attrs.contains(attr)
    }
}

/// Normalize an expanded formula into overlap-free DNF.
pub fn normalize<N>(formula: &Formula, opts: &NormalizeOptions, naming: &N) -> Result<Formula>
where
    N: AttributeNaming + ?Sized,
{
    let dnf = to_dnf(formula).map_err(|e| match e {
        QueryError::UnsupportedNode { node, .. } => QueryError::UnsupportedNode {
            stage: "normalizer",
            node,
        },
        other => other,
    })?;
    Ok(normalize_dnf(dnf, opts, naming)?.to_formula())
}

/// Normalize a DNF value.
///
/// A DNF that is already overlap-free (see [`is_overlap_free`]) is returned
/// unchanged, which makes normalization idempotent.
pub fn normalize_dnf<N>(dnf: Dnf, opts: &NormalizeOptions, naming: &N) -> Result<Dnf>
where
    N: AttributeNaming + ?Sized,
{
    if is_overlap_free(&dnf, opts, naming) {
        debug!(terms = dnf.len(), "DNF already overlap-free");
        return Ok(dnf);
    }
    split(dnf, opts, naming, opts.max_depth)
}

fn split<N>(dnf: Dnf, opts: &NormalizeOptions, naming: &N, depth_left: usize) -> Result<Dnf>
where
    N: AttributeNaming + ?Sized,
{
    let overlapping = overlapping_attributes(&dnf, opts, naming);
    if overlapping.is_empty() {
        return Ok(dnf);
    }
    if depth_left == 0 {
        warn!(
            max_depth = opts.max_depth,
            terms = dnf.len(),
            "split depth exhausted, returning DNF with ordinal overlaps"
        );
        return Ok(dnf);
    }

    let o_pos = split_literal(&dnf, &overlapping, naming)?.positive_form();
    let o_neg = o_pos.complement();
    debug!(
        literal = %o_pos,
        depth = opts.max_depth - depth_left,
        terms = dnf.len(),
        "splitting on ordinal literal"
    );

    let (pos_branch, neg_branch) = partition(&dnf, &o_pos, &o_neg);
    let pos_branch = split(pos_branch, opts, naming, depth_left - 1)?;
    let neg_branch = split(neg_branch, opts, naming, depth_left - 1)?;

    Ok(Dnf::from_literal(o_pos)
        .and(&pos_branch)
        .or(&Dnf::from_literal(o_neg).and(&neg_branch)))
}

/// Literal signatures per ordinal attribute, across all terms.
fn signatures<'a, N>(
    dnf: &'a Dnf,
    opts: &NormalizeOptions,
    naming: &N,
) -> BTreeMap<&'a str, BTreeSet<&'a Literal>>
where
    N: AttributeNaming + ?Sized,
{
    let mut seen: BTreeMap<&str, BTreeSet<&Literal>> = BTreeMap::new();
    for lit in dnf.terms().flat_map(Term::literals) {
        let attr = naming.attribute(&lit.atom);
        if opts.is_ordinal(attr) {
            seen.entry(attr).or_default().insert(lit);
        }
    }
    seen
}

/// Ordinal attributes with at least two distinct literal signatures.
pub fn overlapping_attributes<'a, N>(
    dnf: &'a Dnf,
    opts: &NormalizeOptions,
    naming: &N,
) -> BTreeSet<&'a str>
where
    N: AttributeNaming + ?Sized,
{
    signatures(dnf, opts, naming)
        .into_iter()
        .filter(|(_, sigs)| sigs.len() >= 2)
        .map(|(attr, _)| attr)
        .collect()
}

/// The first literal, scanning terms then literals in order, on an
/// overlapping attribute.
fn split_literal<'a, N>(
    dnf: &'a Dnf,
    overlapping: &BTreeSet<&str>,
    naming: &N,
) -> Result<&'a Literal>
where
    N: AttributeNaming + ?Sized,
{
    dnf.terms()
        .flat_map(Term::literals)
        .find(|lit| overlapping.contains(naming.attribute(&lit.atom)))
        .ok_or_else(|| {
            QueryError::InternalInvariant(format!(
                "overlapping attributes {:?} but no literal to split on",
                overlapping
            ))
        })
}

/// Split the terms into the branch compatible with `o_pos` and the branch
/// compatible with `o_neg`, removing the literal itself.
fn partition(dnf: &Dnf, o_pos: &Literal, o_neg: &Literal) -> (Dnf, Dnf) {
    let mut pos_terms = Vec::new();
    let mut neg_terms = Vec::new();

    for term in dnf.terms() {
        let has_pos = term.contains(o_pos);
        let has_neg = term.contains(o_neg);
        if has_pos && has_neg {
            continue;
        }
        if !has_neg {
            pos_terms.push(term.without(o_pos));
        }
        if !has_pos {
            neg_terms.push(term.without(o_neg));
        }
    }

    (Dnf::from_terms(pos_terms), Dnf::from_terms(neg_terms))
}

/// Returns `true` if no two jointly satisfiable terms disagree on an ordinal
/// attribute.
///
/// Two terms disagree on an attribute when the literals on that attribute
/// that only one of them carries number two or more, e.g. `price__low` in
/// one term and `price__high` in the other. Literals shared by both terms
/// (the split literals above them) are not a disagreement.
pub fn is_overlap_free<N>(dnf: &Dnf, opts: &NormalizeOptions, naming: &N) -> bool
where
    N: AttributeNaming + ?Sized,
{
    let per_term: Vec<BTreeMap<&str, BTreeSet<&Literal>>> = dnf
        .terms()
        .map(|term| {
            let mut sigs: BTreeMap<&str, BTreeSet<&Literal>> = BTreeMap::new();
            for lit in term.literals() {
                let attr = naming.attribute(&lit.atom);
                if opts.is_ordinal(attr) {
                    sigs.entry(attr).or_default().insert(lit);
                }
            }
            sigs
        })
        .collect();
    let terms: Vec<&Term> = dnf.terms().collect();

    for i in 0..terms.len() {
        for j in (i + 1)..terms.len() {
            if terms[i].excludes(terms[j]) {
                continue;
            }
            for attr in &opts.ordinal_attrs {
                let empty = BTreeSet::new();
                let a = per_term[i].get(attr.as_str()).unwrap_or(&empty);
                let b = per_term[j].get(attr.as_str()).unwrap_or(&empty);
                if a.symmetric_difference(b).nth(1).is_some() {
                    return false;
                }
            }
        }
    }
    true
}
