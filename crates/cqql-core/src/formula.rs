//! The CQQL formula tree.
//!
//! A [`Formula`] is an immutable tree with exclusively-owned children. Stages
//! of the pipeline never mutate a tree in place; they build a new one.
//!
//! The [`Display`](fmt::Display) impl produces the canonical textual form,
//! which the parser accepts back unchanged:
//!
//! - `(L & R)` and `(L | R)` for conjunction / disjunction
//! - `!(sub)` for negation
//! - `WAND(t1,t2,L,R)` / `WOR(t1,t2,L,R)` for the weighted connectives

use std::collections::BTreeSet;
use std::fmt;

/// Reserved atom name for the constant `true`.
pub const TRUE: &str = "TRUE";

/// Reserved atom name for the constant `false`.
pub const FALSE: &str = "FALSE";

/// A CQQL formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// A named proposition. `TRUE` and `FALSE` are constants.
    Atom(String),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    /// `WAND(theta1, theta2, left, right)`: each side is required only if
    /// its weight atom holds.
    WeightedAnd {
        theta1: String,
        theta2: String,
        left: Box<Formula>,
        right: Box<Formula>,
    },
    /// `WOR(theta1, theta2, left, right)`: each side contributes only if
    /// its weight atom holds.
    WeightedOr {
        theta1: String,
        theta2: String,
        left: Box<Formula>,
        right: Box<Formula>,
    },
}

impl Formula {
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    /// The constant `TRUE`.
    pub fn truth() -> Self {
        Self::Atom(TRUE.to_string())
    }

    /// The constant `FALSE`.
    pub fn falsity() -> Self {
        Self::Atom(FALSE.to_string())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(sub: Formula) -> Self {
        Self::Not(Box::new(sub))
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    pub fn wand(
        theta1: impl Into<String>,
        theta2: impl Into<String>,
        left: Formula,
        right: Formula,
    ) -> Self {
        Self::WeightedAnd {
            theta1: theta1.into(),
            theta2: theta2.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn wor(
        theta1: impl Into<String>,
        theta2: impl Into<String>,
        left: Formula,
        right: Formula,
    ) -> Self {
        Self::WeightedOr {
            theta1: theta1.into(),
            theta2: theta2.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Short name of the node kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Atom(_) => "atom",
            Self::Not(_) => "not",
            Self::And(..) => "and",
            Self::Or(..) => "or",
            Self::WeightedAnd { .. } => "WAND",
            Self::WeightedOr { .. } => "WOR",
        }
    }

    /// Returns the set of atom names referenced by this formula.
    ///
    /// Weight atoms of `WAND`/`WOR` nodes are included.
    pub fn atoms(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Self::Atom(name) => {
                out.insert(name.as_str());
            }
            Self::Not(sub) => sub.collect_atoms(out),
            Self::And(l, r) | Self::Or(l, r) => {
                l.collect_atoms(out);
                r.collect_atoms(out);
            }
            Self::WeightedAnd {
                theta1,
                theta2,
                left,
                right,
            }
            | Self::WeightedOr {
                theta1,
                theta2,
                left,
                right,
            } => {
                out.insert(theta1.as_str());
                out.insert(theta2.as_str());
                left.collect_atoms(out);
                right.collect_atoms(out);
            }
        }
    }

    /// Returns `true` if no weighted connective remains in the tree.
    pub fn is_expanded(&self) -> bool {
        match self {
            Self::Atom(_) => true,
            Self::Not(sub) => sub.is_expanded(),
            Self::And(l, r) | Self::Or(l, r) => l.is_expanded() && r.is_expanded(),
            Self::WeightedAnd { .. } | Self::WeightedOr { .. } => false,
        }
    }

    /// Crisp boolean value of the formula.
    ///
    /// `is_true` decides ordinary atoms; `TRUE`/`FALSE` are constants.
    /// Weighted nodes follow their defining truth tables:
    /// `WAND = (L | !t1) & (R | !t2)` and `WOR = (L & t1) | (R & t2)`.
    pub fn holds<F>(&self, is_true: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match self {
            Self::Atom(name) => match name.as_str() {
                TRUE => true,
                FALSE => false,
                other => is_true(other),
            },
            Self::Not(sub) => !sub.holds(is_true),
            Self::And(l, r) => l.holds(is_true) && r.holds(is_true),
            Self::Or(l, r) => l.holds(is_true) || r.holds(is_true),
            Self::WeightedAnd {
                theta1,
                theta2,
                left,
                right,
            } => {
                (left.holds(is_true) || !is_true(theta1))
                    && (right.holds(is_true) || !is_true(theta2))
            }
            Self::WeightedOr {
                theta1,
                theta2,
                left,
                right,
            } => {
                (left.holds(is_true) && is_true(theta1))
                    || (right.holds(is_true) && is_true(theta2))
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(name) => f.write_str(name),
            Self::Not(sub) => write!(f, "!({})", sub),
            Self::And(l, r) => write!(f, "({} & {})", l, r),
            Self::Or(l, r) => write!(f, "({} | {})", l, r),
            Self::WeightedAnd {
                theta1,
                theta2,
                left,
                right,
            } => write!(f, "WAND({},{},{},{})", theta1, theta2, left, right),
            Self::WeightedOr {
                theta1,
                theta2,
                left,
                right,
            } => write!(f, "WOR({},{},{},{})", theta1, theta2, left, right),
        }
    }
}
