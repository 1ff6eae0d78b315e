//! Core types for the CQQL query pipeline.
//!
//! This crate holds the formula tree, the literal/term/DNF values the
//! normalizer works on, attribute naming and typing, and the scored objects
//! that formulas are evaluated against.

pub mod attribute;
pub mod formula;
pub mod literal;
pub mod object;

pub use attribute::{AttrType, AttributeNaming, AttributeSchema, Separator};
pub use formula::Formula;
pub use literal::{Dnf, Literal, Term};
pub use object::ScoredObject;
