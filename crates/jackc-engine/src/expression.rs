//! `expression`, `term`, `subroutineCall`, `expressionList`, string literals.

use jackc_emit::Command;
use jackc_lex::{Keyword, Sym, Token, TokenValue};
use jackc_util::{CompileError, CompileResult};

use crate::CompilationEngine;

impl CompilationEngine {
    /// `term (op term)*`, left-associative, no precedence.
    pub(crate) fn compile_expression(&mut self) -> CompileResult<()> {
        self.compile_term()?;

        loop {
            let op = match self.tokenizer.peek() {
                Some(Token { value: TokenValue::Symbol(sym), .. }) if is_binary_op(*sym) => *sym,
                _ => break,
            };
            self.tokenizer.advance();
            self.compile_term()?;
            match op {
                Sym::Plus => self.writer.write_arithmetic(Command::Add),
                Sym::Minus => self.writer.write_arithmetic(Command::Sub),
                Sym::Eq => self.writer.write_arithmetic(Command::Eq),
                Sym::Gt => self.writer.write_arithmetic(Command::Gt),
                Sym::Lt => self.writer.write_arithmetic(Command::Lt),
                Sym::Amp => self.writer.write_arithmetic(Command::And),
                Sym::Pipe => self.writer.write_arithmetic(Command::Or),
                Sym::Star => self.writer.write_call("Math.multiply", 2),
                Sym::Slash => self.writer.write_call("Math.divide", 2),
                _ => unreachable!("is_binary_op filters to the above set"),
            }
        }
        Ok(())
    }

    /// The term-level disambiguation table described in the design.
    pub(crate) fn compile_term(&mut self) -> CompileResult<()> {
        let tok = match self.tokenizer.peek().cloned() {
            Some(tok) => tok,
            None => {
                return Err(CompileError::KindMismatch {
                    expected: "term".to_string(),
                    actual: "end of file".to_string(),
                    span: jackc_util::Span::DUMMY,
                })
            }
        };

        match &tok.value {
            TokenValue::IntConst(n) => {
                self.tokenizer.advance();
                self.writer.write_constant(*n);
            }
            TokenValue::StringConst(s) => {
                self.tokenizer.advance();
                self.compile_string_literal(s);
            }
            TokenValue::Keyword(Keyword::True) => {
                self.tokenizer.advance();
                self.writer.write_constant(1);
                self.writer.write_arithmetic(Command::Neg);
            }
            TokenValue::Keyword(Keyword::False) | TokenValue::Keyword(Keyword::Null) => {
                self.tokenizer.advance();
                self.writer.write_constant(0);
            }
            TokenValue::Keyword(Keyword::This) => {
                self.tokenizer.advance();
                self.writer.write_push_this_ptr();
            }
            TokenValue::Symbol(Sym::LParen) => {
                self.tokenizer.advance();
                self.compile_expression()?;
                self.expect_symbol(Sym::RParen)?;
            }
            TokenValue::Symbol(Sym::Minus) => {
                self.tokenizer.advance();
                self.compile_term()?;
                self.writer.write_arithmetic(Command::Neg);
            }
            TokenValue::Symbol(Sym::Tilde) => {
                self.tokenizer.advance();
                self.compile_term()?;
                self.writer.write_arithmetic(Command::Not);
            }
            TokenValue::Identifier(_) if self.peek_second_is_symbol(Sym::LParen) || self.peek_second_is_symbol(Sym::Dot) => {
                self.compile_subroutine_call()?;
            }
            TokenValue::Identifier(_) if self.peek_second_is_symbol(Sym::LBracket) => {
                let span = tok.span;
                let name = match tok.value {
                    TokenValue::Identifier(name) => name,
                    _ => unreachable!(),
                };
                self.tokenizer.advance();
                let entry = self
                    .lookup(&name)
                    .ok_or(CompileError::UndefinedSymbol { name, span })?;
                self.writer.write_push(entry.segment, entry.index);

                self.expect_symbol(Sym::LBracket)?;
                self.compile_expression()?;
                self.expect_symbol(Sym::RBracket)?;

                self.writer.write_arithmetic(Command::Add);
                self.writer.write_pop_that_ptr();
                self.writer.write_push(jackc_sym::Segment::That, 0);
            }
            TokenValue::Identifier(_) => {
                let span = tok.span;
                let name = match tok.value {
                    TokenValue::Identifier(name) => name,
                    _ => unreachable!(),
                };
                self.tokenizer.advance();
                let entry = self
                    .lookup(&name)
                    .ok_or(CompileError::UndefinedSymbol { name, span })?;
                self.writer.write_push(entry.segment, entry.index);
            }
            _ => {
                return Err(CompileError::KindMismatch {
                    expected: "term".to_string(),
                    actual: tok.describe(),
                    span: tok.span,
                })
            }
        }

        Ok(())
    }

    /// `"..."` → `String.new` plus one `String.appendChar` call per character.
    fn compile_string_literal(&mut self, s: &str) {
        self.writer.write_constant(s.chars().count() as u16);
        self.writer.write_call("String.new", 1);
        for ch in s.chars() {
            self.writer.write_constant(ch as u16);
            self.writer.write_call("String.appendChar", 2);
        }
    }

    /// Disambiguates and emits one of the three call shapes:
    /// `name(...)`, `var.name(...)`, or `Class.name(...)`.
    pub(crate) fn compile_subroutine_call(&mut self) -> CompileResult<()> {
        let name1_span = self.current_span();
        let name1 = self.expect_identifier()?;

        if self.peek_is_symbol(Sym::LParen) {
            self.expect_symbol(Sym::LParen)?;
            self.writer.write_push_this_ptr();
            let n_explicit = self.compile_expression_list()?;
            self.expect_symbol(Sym::RParen)?;
            self.writer
                .write_call(&format!("{}.{}", self.class_name, name1), n_explicit + 1);
            return Ok(());
        }

        if self.peek_is_symbol(Sym::Dot) {
            self.expect_symbol(Sym::Dot)?;
            let name2 = self.expect_identifier()?;
            self.expect_symbol(Sym::LParen)?;

            let resolved = self.lookup(&name1);
            let (callee_class, has_implicit_arg) = match &resolved {
                Some(entry) => (entry.declared_type.clone(), true),
                None => (name1, false),
            };
            if let Some(entry) = &resolved {
                self.writer.write_push(entry.segment, entry.index);
            }

            let n_explicit = self.compile_expression_list()?;
            self.expect_symbol(Sym::RParen)?;

            let n_total = n_explicit + if has_implicit_arg { 1 } else { 0 };
            self.writer.write_call(&format!("{}.{}", callee_class, name2), n_total);
            return Ok(());
        }

        let tok = self.tokenizer.peek().cloned();
        Err(CompileError::KindMismatch {
            expected: "( or .".to_string(),
            actual: tok.map(|t| t.describe()).unwrap_or_else(Self::eof_describe),
            span: name1_span,
        })
    }

    /// `(expression (',' expression)*)?`, returns the number of expressions.
    fn compile_expression_list(&mut self) -> CompileResult<u16> {
        if self.peek_is_symbol(Sym::RParen) {
            return Ok(0);
        }

        let mut count = 1u16;
        self.compile_expression()?;
        while self.peek_is_symbol(Sym::Comma) {
            self.expect_symbol(Sym::Comma)?;
            self.compile_expression()?;
            count += 1;
        }
        Ok(count)
    }
}

fn is_binary_op(sym: Sym) -> bool {
    matches!(
        sym,
        Sym::Plus | Sym::Minus | Sym::Star | Sym::Slash | Sym::Amp | Sym::Pipe | Sym::Lt | Sym::Gt | Sym::Eq
    )
}
