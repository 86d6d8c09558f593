//! Lexical analysis for Jack source files: comment stripping followed by
//! tokenization into a fully materialized, peekable token stream.

pub mod comment;
pub mod cursor;
pub mod token;
pub mod tokenizer;

pub use token::{Keyword, Sym, Token, TokenKind, TokenValue};
pub use tokenizer::Tokenizer;
