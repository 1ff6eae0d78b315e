//! Recursive-descent parser for CQQL formulas.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr     := or_expr
//! or_expr  := and_expr ('|' and_expr)*
//! and_expr := unary ('&' unary)*
//! unary    := '!' unary | primary
//! primary  := IDENT
//!           | '(' expr ')'
//!           | ('WAND' | 'WOR') '(' IDENT ',' IDENT ',' expr ',' expr ')'
//! ```
//!
//! `WAND` and `WOR` are only calls when the next token is `(`; otherwise they
//! are ordinary atoms.

use cqql_core::Formula;

use crate::error::ParseError;
use crate::lexer::{Token, TokenKind, tokenize};

const WAND: &str = "WAND";
const WOR: &str = "WOR";

/// Deepest formula tree, and deepest nesting of `!`, `(` and weighted
/// calls, that [`parse`] accepts.
pub const MAX_NESTING: usize = 256;

/// Parse a complete formula. Trailing tokens are an error.
///
/// Input nested deeper than [`MAX_NESTING`] levels is a syntax error, so
/// every later stage can recurse over the tree safely.
pub fn parse(input: &str) -> Result<Formula, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        nesting: 0,
    };
    let (formula, _) = parser.parse_or()?;
    parser.expect(TokenKind::Eof)?;
    Ok(formula)
}

/// A subformula with the height of its tree (an atom is 1).
type Parsed = (Formula, usize);

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    nesting: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // `tokenize` always ends with Eof and we never advance past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_at(&self, ahead: usize) -> &TokenKind {
        let idx = (self.pos + ahead).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error(&self, expected: impl Into<String>) -> ParseError {
        syntax_error(expected, self.peek())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.eat(&kind) {
            Ok(())
        } else {
            Err(self.error(kind.to_string()))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error("identifier")),
        }
    }

    /// Enter one level of `!`, `(` or a weighted call at the current token.
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(too_deep(self.peek()));
        }
        self.nesting += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    fn parse_or(&mut self) -> Result<Parsed, ParseError> {
        let (mut left, mut height) = self.parse_and()?;
        while self.peek().kind == TokenKind::Or {
            let op = self.advance();
            let (right, right_height) = self.parse_and()?;
            height = checked_height(height.max(right_height) + 1, &op)?;
            left = Formula::or(left, right);
        }
        Ok((left, height))
    }

    fn parse_and(&mut self) -> Result<Parsed, ParseError> {
        let (mut left, mut height) = self.parse_unary()?;
        while self.peek().kind == TokenKind::And {
            let op = self.advance();
            let (right, right_height) = self.parse_unary()?;
            height = checked_height(height.max(right_height) + 1, &op)?;
            left = Formula::and(left, right);
        }
        Ok((left, height))
    }

    fn parse_unary(&mut self) -> Result<Parsed, ParseError> {
        if self.peek().kind != TokenKind::Not {
            return self.parse_primary();
        }
        self.enter()?;
        let op = self.advance();
        let (sub, height) = self.parse_unary()?;
        self.leave();
        Ok((Formula::not(sub), checked_height(height + 1, &op)?))
    }

    fn parse_primary(&mut self) -> Result<Parsed, ParseError> {
        match self.peek().kind.clone() {
            TokenKind::LParen => {
                self.enter()?;
                self.advance();
                let inner = self.parse_or()?;
                self.expect(TokenKind::RParen)?;
                self.leave();
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                let is_call = (name == WAND || name == WOR)
                    && *self.peek_at(1) == TokenKind::LParen;
                if !is_call {
                    self.advance();
                    return Ok((Formula::Atom(name), 1));
                }
                self.enter()?;
                let call = self.advance();
                let parsed = self.parse_weighted(&name, &call)?;
                self.leave();
                Ok(parsed)
            }
            _ => Err(self.error("identifier or '('")),
        }
    }

    /// Parses the argument list of a `WAND`/`WOR` call; the name is consumed.
    fn parse_weighted(&mut self, name: &str, call: &Token) -> Result<Parsed, ParseError> {
        self.expect(TokenKind::LParen)?;
        let theta1 = self.expect_ident()?;
        self.expect(TokenKind::Comma)?;
        let theta2 = self.expect_ident()?;
        self.expect(TokenKind::Comma)?;
        let (left, left_height) = self.parse_or()?;
        self.expect(TokenKind::Comma)?;
        let (right, right_height) = self.parse_or()?;
        self.expect(TokenKind::RParen)?;

        let height = checked_height(left_height.max(right_height) + 1, call)?;
        let formula = if name == WAND {
            Formula::wand(theta1, theta2, left, right)
        } else {
            Formula::wor(theta1, theta2, left, right)
        };
        Ok((formula, height))
    }
}

fn syntax_error(expected: impl Into<String>, tok: &Token) -> ParseError {
    ParseError::Syntax {
        expected: expected.into(),
        found: tok.kind.to_string(),
        position: tok.offset,
    }
}

fn too_deep(tok: &Token) -> ParseError {
    syntax_error(format!("at most {} nested levels", MAX_NESTING), tok)
}

fn checked_height(height: usize, at: &Token) -> Result<usize, ParseError> {
    if height > MAX_NESTING {
        return Err(too_deep(at));
    }
    Ok(height)
}
