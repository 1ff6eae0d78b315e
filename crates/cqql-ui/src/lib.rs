//! Terminal styling for CQQL command-line output.
//!
//! Provides Ayu-themed colors for pipeline stages and match scores, plus
//! terminal and color-support detection.

pub mod styles;
pub mod terminal;
