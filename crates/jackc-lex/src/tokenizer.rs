//! Tokenizer: turns preprocessed Jack source into a fully materialized token
//! stream.
//!
//! The reference tool tokenizes with one `std::regex` alternation and walks
//! the match iterator; any byte that doesn't start a recognized token is
//! simply skipped rather than raised as an error. This implementation keeps
//! that behavior — the engine's own grammar checks are what ultimately
//! reject malformed programs.

use jackc_util::Span;
use tracing::warn;

use crate::comment::strip_comments;
use crate::cursor::Cursor;
use crate::token::{Keyword, Sym, Token, TokenValue};

/// Jack integers are 16-bit and conventionally restricted to 0..=32767; the
/// tokenizer never rejects an out-of-range literal (no recovery path for it
/// in the no-recovery design), it only warns.
const MAX_INT_CONST: u32 = 32767;

/// A fully materialized, peekable stream of [`Token`]s for one source file.
pub struct Tokenizer {
    tokens: Vec<Token>,
    position: usize,
}

impl Tokenizer {
    /// Strips comments and tokenizes the given source in one pass.
    pub fn new(source: &str) -> Self {
        let stripped = strip_comments(source);
        let tokens = tokenize(&stripped);
        Self { tokens, position: 0 }
    }

    pub fn has_more(&self) -> bool {
        self.position < self.tokens.len()
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub fn peek_second(&self) -> Option<&Token> {
        self.tokens.get(self.position + 1)
    }

    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }
}

fn tokenize(source: &str) -> Vec<Token> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    while !cursor.is_at_end() {
        let c = cursor.current() as char;

        if c.is_whitespace() {
            cursor.advance();
            continue;
        }

        let start = cursor.position();
        let start_line = cursor.line();
        let start_col = cursor.column();

        if c.is_ascii_digit() {
            while cursor.current().is_ascii_digit() {
                cursor.advance();
            }
            let text = cursor.slice_from(start);
            let value: u32 = text.parse().unwrap_or(0);
            if value > MAX_INT_CONST {
                warn!(
                    "integer constant {} at line {} exceeds the conventional 0..=32767 range",
                    value, start_line
                );
            }
            let span = Span::new(start, cursor.position(), start_line, start_col);
            tokens.push(Token::new(TokenValue::IntConst(value as u16), span));
            continue;
        }

        if c == '"' {
            cursor.advance();
            let str_start = cursor.position();
            while !cursor.is_at_end() && cursor.current() != b'"' && cursor.current() != b'\n' {
                cursor.advance();
            }
            let text = cursor.slice_from(str_start).to_string();
            if cursor.current() == b'"' {
                cursor.advance();
            }
            let span = Span::new(start, cursor.position(), start_line, start_col);
            tokens.push(Token::new(TokenValue::StringConst(text), span));
            continue;
        }

        if c == '_' || c.is_ascii_alphabetic() {
            while {
                let ch = cursor.current() as char;
                ch == '_' || ch.is_ascii_alphanumeric()
            } {
                cursor.advance();
            }
            let text = cursor.slice_from(start);
            let span = Span::new(start, cursor.position(), start_line, start_col);
            let value = match Keyword::from_str(text) {
                Some(kw) => TokenValue::Keyword(kw),
                None => TokenValue::Identifier(text.to_string()),
            };
            tokens.push(Token::new(value, span));
            continue;
        }

        if let Some(sym) = Sym::from_char(c) {
            cursor.advance();
            let span = Span::new(start, cursor.position(), start_line, start_col);
            tokens.push(Token::new(TokenValue::Symbol(sym), span));
            continue;
        }

        // Unrecognized byte: silently skipped, matching the reference
        // tool's regex-iterator behavior.
        cursor.advance();
    }

    tokens
}
