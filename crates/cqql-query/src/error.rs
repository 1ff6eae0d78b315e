//! Error types for the query pipeline.

/// Errors produced while turning text into a [`Formula`](cqql_core::Formula).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A character that cannot start any token.
    #[error("unexpected character '{ch}' at offset {offset}")]
    Lex {
        /// The offending character.
        ch: char,
        /// Byte offset of the character in the input.
        offset: usize,
    },

    /// A token that does not fit the grammar at this point.
    #[error("expected {expected}, found {found} at offset {position}")]
    Syntax {
        /// What the grammar required.
        expected: String,
        /// What the input contained.
        found: String,
        /// Byte offset of the offending token.
        position: usize,
    },
}

impl ParseError {
    /// Short name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lex { .. } => "lex error",
            Self::Syntax { .. } => "syntax error",
        }
    }

    /// Byte offset the error points at.
    pub fn position(&self) -> usize {
        match self {
            Self::Lex { offset, .. } => *offset,
            Self::Syntax { position, .. } => *position,
        }
    }
}

/// Errors produced by the pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A stage received a node kind outside its precondition, e.g. the
    /// evaluator was handed a formula that still contains `WAND`.
    #[error("{stage} does not accept {node} nodes (expand weights first)")]
    UnsupportedNode {
        stage: &'static str,
        node: &'static str,
    },

    /// A bug in the normalizer, not a problem with the input.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl QueryError {
    /// Short name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(e) => e.kind(),
            Self::UnsupportedNode { .. } => "unsupported node",
            Self::InternalInvariant(_) => "internal error",
        }
    }
}

/// A specialized `Result` type for pipeline operations.
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_message_names_char_and_offset() {
        let e = ParseError::Lex { ch: '#', offset: 4 };
        assert_eq!(e.to_string(), "unexpected character '#' at offset 4");
        assert_eq!(e.position(), 4);
        assert_eq!(e.kind(), "lex error");
    }

    #[test]
    fn parse_error_is_transparent_in_query_error() {
        let e: QueryError = ParseError::Syntax {
            expected: "')'".into(),
            found: "end of input".into(),
            position: 7,
        }
        .into();
        assert_eq!(e.to_string(), "expected ')', found end of input at offset 7");
        assert_eq!(e.kind(), "syntax error");
    }
}
