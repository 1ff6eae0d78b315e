//! The CQQL query pipeline.
//!
//! Text is parsed into a [`Formula`](cqql_core::Formula), weighted
//! connectives are expanded away, ordinal overlaps are removed by case
//! splitting, and the result is evaluated as a fuzzy score per object.
//!
//! ```text
//! parse ──► expand ──► normalize ──► evaluate / rank
//! ```

pub mod dnf;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod weights;

pub use dnf::to_dnf;
pub use error::{ParseError, QueryError, Result};
pub use eval::{DB_THRESHOLD, Ranked, evaluate, rank};
pub use normalize::{DEFAULT_MAX_DEPTH, NormalizeOptions, is_overlap_free, normalize, normalize_dnf};
pub use parser::{MAX_NESTING, parse};
pub use pipeline::{Compiled, compile};
pub use weights::expand;
