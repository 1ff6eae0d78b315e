//! Literals, terms and disjunctive normal form.
//!
//! A [`Term`] is a conjunction of literals with set semantics; a [`Dnf`] is a
//! disjunction of terms. Both are kept in sorted sets so that iteration order
//! is canonical: literals order by atom name, positive before negative, and
//! terms order lexicographically by their literals.

use std::collections::BTreeSet;
use std::fmt;

use crate::formula::{FALSE, Formula, TRUE};

/// An atom name paired with a polarity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub atom: String,
    pub negated: bool,
}

impl Literal {
    pub fn positive(atom: impl Into<String>) -> Self {
        Self {
            atom: atom.into(),
            negated: false,
        }
    }

    pub fn negative(atom: impl Into<String>) -> Self {
        Self {
            atom: atom.into(),
            negated: true,
        }
    }

    /// The same atom with the opposite polarity.
    pub fn complement(&self) -> Self {
        Self {
            atom: self.atom.clone(),
            negated: !self.negated,
        }
    }

    /// The literal with its polarity dropped.
    pub fn positive_form(&self) -> Self {
        Self::positive(self.atom.clone())
    }

    pub fn to_formula(&self) -> Formula {
        let atom = Formula::atom(self.atom.clone());
        if self.negated { Formula::not(atom) } else { atom }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!{}", self.atom)
        } else {
            f.write_str(&self.atom)
        }
    }
}

/// A conjunction of literals. The empty term is `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term(BTreeSet<Literal>);

impl Term {
    /// The empty conjunction.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a term from a single literal, folding the reserved constants.
    ///
    /// Returns `None` when the literal is `FALSE` (or `!TRUE`); `TRUE`
    /// (or `!FALSE`) yields the empty term.
    pub fn from_literal(lit: Literal) -> Option<Self> {
        match (lit.atom.as_str(), lit.negated) {
            (TRUE, false) | (FALSE, true) => Some(Self::empty()),
            (TRUE, true) | (FALSE, false) => None,
            _ => Some(Self(BTreeSet::from([lit]))),
        }
    }

    /// Build a term from literals, returning `None` if it is contradictory.
    pub fn from_literals<I>(lits: I) -> Option<Self>
    where
        I: IntoIterator<Item = Literal>,
    {
        lits.into_iter()
            .try_fold(Self::empty(), |acc, lit| acc.conjoin(&Self::from_literal(lit)?))
    }

    /// Conjunction of two terms. `None` if the result contains a literal
    /// together with its complement.
    pub fn conjoin(&self, other: &Term) -> Option<Term> {
        let mut lits = self.0.clone();
        for lit in &other.0 {
            if self.0.contains(&lit.complement()) {
                return None;
            }
            lits.insert(lit.clone());
        }
        Some(Term(lits))
    }

    pub fn contains(&self, lit: &Literal) -> bool {
        self.0.contains(lit)
    }

    /// A copy of this term without `lit`.
    pub fn without(&self, lit: &Literal) -> Term {
        let mut lits = self.0.clone();
        lits.remove(lit);
        Term(lits)
    }

    /// `true` if every literal of `self` also appears in `other`.
    pub fn is_subset(&self, other: &Term) -> bool {
        self.0.is_subset(&other.0)
    }

    /// `true` if the two terms cannot hold at the same time.
    pub fn excludes(&self, other: &Term) -> bool {
        self.0.iter().any(|lit| other.0.contains(&lit.complement()))
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn holds<F>(&self, is_true: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.0.iter().all(|lit| is_true(&lit.atom) != lit.negated)
    }

    /// Left-folded conjunction of the literals, or `TRUE` when empty.
    pub fn to_formula(&self) -> Formula {
        self.0
            .iter()
            .map(Literal::to_formula)
            .reduce(Formula::and)
            .unwrap_or_else(Formula::truth)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(TRUE);
        }
        let parts: Vec<String> = self.0.iter().map(Literal::to_string).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// A disjunction of terms. No terms is `false`; a single empty term is `true`.
///
/// Every constructor keeps the term set absorbed: no term is a superset of
/// another one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Dnf(BTreeSet<Term>);

impl Dnf {
    pub fn falsity() -> Self {
        Self::default()
    }

    pub fn truth() -> Self {
        Self(BTreeSet::from([Term::empty()]))
    }

    pub fn from_literal(lit: Literal) -> Self {
        Self::from_terms(Term::from_literal(lit))
    }

    /// Build a DNF from terms, dropping duplicates and absorbed terms.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = Term>,
    {
        let mut sorted: Vec<Term> = terms.into_iter().collect();
        sorted.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        sorted.dedup();

        let mut kept: Vec<Term> = Vec::with_capacity(sorted.len());
        for term in sorted {
            if !kept.iter().any(|k| k.is_subset(&term)) {
                kept.push(term);
            }
        }
        Self(kept.into_iter().collect())
    }

    /// Disjunction.
    pub fn or(&self, other: &Dnf) -> Dnf {
        Self::from_terms(self.0.iter().chain(other.0.iter()).cloned())
    }

    /// Conjunction, distributing over both term sets.
    pub fn and(&self, other: &Dnf) -> Dnf {
        Self::from_terms(
            self.0
                .iter()
                .flat_map(|l| other.0.iter().filter_map(move |r| l.conjoin(r))),
        )
    }

    pub fn is_false(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_true(&self) -> bool {
        self.0.len() == 1 && self.0.iter().all(Term::is_empty)
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn holds<F>(&self, is_true: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.0.iter().any(|t| t.holds(is_true))
    }

    /// Left-folded disjunction of the term formulas, `FALSE` when empty.
    pub fn to_formula(&self) -> Formula {
        self.0
            .iter()
            .map(Term::to_formula)
            .reduce(Formula::or)
            .unwrap_or_else(Formula::falsity)
    }
}

impl fmt::Display for Dnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(FALSE);
        }
        let parts: Vec<String> = self.0.iter().map(Term::to_string).collect();
        f.write_str(&parts.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pos(a: &str) -> Literal {
        Literal::positive(a)
    }

    fn neg(a: &str) -> Literal {
        Literal::negative(a)
    }

    fn term(lits: &[Literal]) -> Term {
        Term::from_literals(lits.iter().cloned()).unwrap()
    }

    #[test]
    fn literal_order_is_name_then_polarity() {
        let mut lits = vec![neg("b"), pos("b"), neg("a")];
        lits.sort();
        assert_eq!(lits, vec![neg("a"), pos("b"), neg("b")]);
    }

    #[test]
    fn term_deduplicates_literals() {
        let t = term(&[pos("A"), pos("A"), neg("B")]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn contradictory_term_is_none() {
        assert!(Term::from_literals([pos("A"), neg("A")]).is_none());
    }

    #[test]
    fn constants_fold_inside_terms() {
        assert_eq!(Term::from_literals([pos("A"), pos(TRUE)]), Some(term(&[pos("A")])));
        assert!(Term::from_literals([pos("A"), pos(FALSE)]).is_none());
        assert!(Term::from_literals([neg(TRUE)]).is_none());
        assert_eq!(Term::from_literals([neg(FALSE)]), Some(Term::empty()));
    }

    #[test]
    fn absorption_drops_supersets() {
        let dnf = Dnf::from_terms([term(&[pos("A"), pos("B")]), term(&[pos("A")])]);
        assert_eq!(dnf.len(), 1);
        assert_eq!(dnf.to_string(), "{A}");
    }

    #[test]
    fn or_with_truth_collapses_to_truth() {
        let dnf = Dnf::from_literal(pos("A")).or(&Dnf::truth());
        assert!(dnf.is_true());
        assert_eq!(dnf.to_formula(), Formula::truth());
    }

    #[test]
    fn and_with_complement_is_false() {
        let dnf = Dnf::from_literal(pos("A")).and(&Dnf::from_literal(neg("A")));
        assert!(dnf.is_false());
        assert_eq!(dnf.to_formula(), Formula::falsity());
    }

    #[test]
    fn and_distributes() {
        let ab = Dnf::from_literal(pos("A")).or(&Dnf::from_literal(pos("B")));
        let c = Dnf::from_literal(neg("C"));
        assert_eq!(ab.and(&c).to_string(), "{A, !C} | {B, !C}");
    }

    #[test]
    fn term_to_formula_is_left_folded() {
        let t = term(&[pos("c"), pos("a"), neg("b")]);
        assert_eq!(t.to_formula().to_string(), "((a & !(b)) & c)");
    }

    #[test]
    fn excludes_needs_a_complementary_pair() {
        let a = term(&[pos("x"), pos("y")]);
        let b = term(&[neg("x")]);
        let c = term(&[pos("y")]);
        assert!(a.excludes(&b));
        assert!(b.excludes(&a));
        assert!(!a.excludes(&c));
    }

    #[test]
    fn holds_checks_polarity() {
        let t = term(&[pos("A"), neg("B")]);
        assert!(t.holds(&|n: &str| n == "A"));
        assert!(!t.holds(&|_: &str| true));
    }
}
