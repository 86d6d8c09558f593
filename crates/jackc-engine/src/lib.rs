//! The Compilation Engine: a recursive-descent parser for Jack that emits VM
//! code inline, in one pass, with no separate AST stage.
//!
//! The grammar methods live in sibling modules, split by grammar level
//! (`class`, `subroutine`, `statement`, `expression`); this module owns the
//! engine's state and the primitive token-matching helpers they all share.

mod class;
mod expression;
mod statement;
mod subroutine;

use jackc_emit::VmWriter;
use jackc_lex::{Keyword, Sym, Token, TokenKind, TokenValue, Tokenizer};
use jackc_sym::{Entry, SymbolTable};
use jackc_util::{CompileError, CompileResult, Span};

/// Per-class, per-subroutine engine state. One engine compiles exactly one
/// `.jack` file; the driver constructs a fresh one per file so no state
/// crosses files.
pub struct CompilationEngine {
    tokenizer: Tokenizer,
    writer: VmWriter,
    class_table: SymbolTable,
    subroutine_table: SymbolTable,
    class_name: String,
    label_counter: u32,
    /// One rendered `subroutine_table.dump(...)` per subroutine, captured
    /// right after that subroutine finishes compiling and before the table
    /// is reset for the next one. See [`Self::compile_with_tables`].
    subroutine_dumps: Vec<String>,
}

impl CompilationEngine {
    pub fn new(source: &str) -> Self {
        Self {
            tokenizer: Tokenizer::new(source),
            writer: VmWriter::new(),
            class_table: SymbolTable::new(),
            subroutine_table: SymbolTable::new(),
            class_name: String::new(),
            label_counter: 0,
            subroutine_dumps: Vec::new(),
        }
    }

    /// Compiles the whole file and returns the accumulated VM text. Consumes
    /// the engine since it is single-use by design.
    pub fn compile(mut self) -> CompileResult<String> {
        self.compile_class()?;
        Ok(self.writer.finish())
    }

    /// Like [`Self::compile`] but also returns the class symbol table and one
    /// rendered subroutine-table dump per subroutine, for callers that want a
    /// `-d` debug trace alongside the VM text. The subroutine table is reset
    /// at the start of every subroutine (see `subroutine::compile_subroutine`),
    /// so a single final snapshot would only ever reflect the last subroutine
    /// in the class — each subroutine's dump is captured immediately after it
    /// finishes compiling instead.
    pub fn compile_with_tables(mut self) -> CompileResult<(String, SymbolTable, Vec<String>)> {
        self.compile_class()?;
        Ok((self.writer.finish(), self.class_table, self.subroutine_dumps))
    }

    /// Allocates the next pair of class-scoped, monotonically increasing
    /// labels, e.g. `("L4", "L5")`. Never reused across an `if`/`while`.
    fn next_label_pair(&mut self) -> (String, String) {
        let first = format!("L{}", self.label_counter);
        let second = format!("L{}", self.label_counter + 1);
        self.label_counter += 2;
        (first, second)
    }

    /// Looks up an identifier: subroutine table first, then class table.
    fn lookup(&self, name: &str) -> Option<Entry> {
        self.subroutine_table
            .entry_of(name)
            .or_else(|| self.class_table.entry_of(name))
            .cloned()
    }

    fn current_span(&self) -> Span {
        self.tokenizer.peek().map(|t| t.span).unwrap_or(Span::DUMMY)
    }

    fn eof_describe() -> String {
        "end of file".to_string()
    }

    fn peek_is_symbol(&self, sym: Sym) -> bool {
        matches!(self.tokenizer.peek(), Some(Token { value: TokenValue::Symbol(s), .. }) if *s == sym)
    }

    fn peek_is_keyword(&self, kw: Keyword) -> bool {
        matches!(self.tokenizer.peek(), Some(Token { value: TokenValue::Keyword(k), .. }) if *k == kw)
    }

    fn peek_second_is_symbol(&self, sym: Sym) -> bool {
        matches!(self.tokenizer.peek_second(), Some(Token { value: TokenValue::Symbol(s), .. }) if *s == sym)
    }

    /// Consumes the next token unconditionally iff it is the exact symbol
    /// `sym`; otherwise raises a token-value-mismatch error.
    fn expect_symbol(&mut self, sym: Sym) -> CompileResult<()> {
        match self.tokenizer.peek().cloned() {
            Some(tok) if tok.value == TokenValue::Symbol(sym) => {
                self.tokenizer.advance();
                Ok(())
            }
            Some(tok) => Err(CompileError::TokenMismatch {
                expected: sym.as_char().to_string(),
                actual: tok.describe(),
                span: tok.span,
            }),
            None => Err(CompileError::TokenMismatch {
                expected: sym.as_char().to_string(),
                actual: Self::eof_describe(),
                span: Span::DUMMY,
            }),
        }
    }

    /// Consumes the next token unconditionally iff it is the exact keyword `kw`.
    fn expect_keyword(&mut self, kw: Keyword) -> CompileResult<()> {
        match self.tokenizer.peek().cloned() {
            Some(tok) if tok.value == TokenValue::Keyword(kw) => {
                self.tokenizer.advance();
                Ok(())
            }
            Some(tok) => Err(CompileError::TokenMismatch {
                expected: kw.as_str().to_string(),
                actual: tok.describe(),
                span: tok.span,
            }),
            None => Err(CompileError::TokenMismatch {
                expected: kw.as_str().to_string(),
                actual: Self::eof_describe(),
                span: Span::DUMMY,
            }),
        }
    }

    /// Consumes the next token iff it is an identifier, returning its text.
    fn expect_identifier(&mut self) -> CompileResult<String> {
        match self.tokenizer.peek().cloned() {
            Some(tok) if tok.kind() == TokenKind::Identifier => {
                self.tokenizer.advance();
                match tok.value {
                    TokenValue::Identifier(name) => Ok(name),
                    _ => unreachable!(),
                }
            }
            Some(tok) => Err(CompileError::KindMismatch {
                expected: "identifier".to_string(),
                actual: tok.describe(),
                span: tok.span,
            }),
            None => Err(CompileError::KindMismatch {
                expected: "identifier".to_string(),
                actual: Self::eof_describe(),
                span: Span::DUMMY,
            }),
        }
    }

    /// Consumes a `int`/`char`/`boolean` keyword or a class-name identifier,
    /// returning the type's textual name. `set_name` names the requirement
    /// set for the `KindMismatch` error (e.g. `"var type"`), matching the
    /// original tool's `verifySet(TokenSet::DATA_TYPES, "var type")`.
    fn expect_type(&mut self, set_name: &str) -> CompileResult<String> {
        match self.tokenizer.peek().cloned() {
            Some(Token { value: TokenValue::Keyword(kw @ (Keyword::Int | Keyword::Char | Keyword::Boolean)), .. }) => {
                self.tokenizer.advance();
                Ok(kw.as_str().to_string())
            }
            Some(Token { value: TokenValue::Identifier(name), .. }) => {
                self.tokenizer.advance();
                Ok(name)
            }
            Some(tok) => Err(CompileError::KindMismatch {
                expected: set_name.to_string(),
                actual: tok.describe(),
                span: tok.span,
            }),
            None => Err(CompileError::KindMismatch {
                expected: set_name.to_string(),
                actual: Self::eof_describe(),
                span: Span::DUMMY,
            }),
        }
    }

    /// Like [`Self::expect_type`] but also accepts `void`; always reports
    /// the `"return type"` set name on mismatch, matching the original
    /// tool's `verifySet(TokenSet::RETURN_TYPES, "return type")`.
    fn expect_return_type(&mut self) -> CompileResult<String> {
        if self.peek_is_keyword(Keyword::Void) {
            self.tokenizer.advance();
            return Ok("void".to_string());
        }
        self.expect_type("return type")
    }
}
