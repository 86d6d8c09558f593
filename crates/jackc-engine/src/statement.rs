//! `statements`, `let`, `if`, `while`, `do`, `return`.

use jackc_emit::Command;
use jackc_lex::{Keyword, Sym};
use jackc_sym::Segment;
use jackc_util::{CompileError, CompileResult};

use crate::CompilationEngine;

impl CompilationEngine {
    /// `statement*`
    pub(crate) fn compile_statements(&mut self) -> CompileResult<()> {
        loop {
            if self.peek_is_keyword(Keyword::Let) {
                self.compile_let()?;
            } else if self.peek_is_keyword(Keyword::If) {
                self.compile_if()?;
            } else if self.peek_is_keyword(Keyword::While) {
                self.compile_while()?;
            } else if self.peek_is_keyword(Keyword::Do) {
                self.compile_do()?;
            } else if self.peek_is_keyword(Keyword::Return) {
                self.compile_return()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// `'let' varName ('[' expression ']')? '=' expression ';'`
    fn compile_let(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Let)?;
        let name_span = self.current_span();
        let name = self.expect_identifier()?;

        let is_array = if self.peek_is_symbol(Sym::LBracket) {
            let entry = self.lookup(&name).ok_or_else(|| CompileError::UndefinedSymbol {
                name: name.clone(),
                span: name_span,
            })?;
            self.writer.write_push(entry.segment, entry.index);

            self.expect_symbol(Sym::LBracket)?;
            self.compile_expression()?;
            self.expect_symbol(Sym::RBracket)?;
            self.writer.write_arithmetic(Command::Add);
            true
        } else {
            false
        };

        self.expect_symbol(Sym::Eq)?;
        self.compile_expression()?;
        self.expect_symbol(Sym::Semicolon)?;

        if is_array {
            self.writer.write_pop(Segment::Temp, 0);
            self.writer.write_pop_that_ptr();
            self.writer.write_push(Segment::Temp, 0);
            self.writer.write_pop(Segment::That, 0);
        } else {
            let entry = self.lookup(&name).ok_or(CompileError::UndefinedSymbol {
                name: name.clone(),
                span: name_span,
            })?;
            self.writer.write_pop(entry.segment, entry.index);
        }

        Ok(())
    }

    /// `'if' '(' expression ')' '{' statements '}' ('else' '{' statements '}')?`
    fn compile_if(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::If)?;
        self.expect_symbol(Sym::LParen)?;
        self.compile_expression()?;
        self.expect_symbol(Sym::RParen)?;

        let (l_else, l_end) = self.next_label_pair();
        self.writer.write_arithmetic(Command::Not);
        self.writer.write_if(&l_else);

        self.expect_symbol(Sym::LBrace)?;
        self.compile_statements()?;
        self.expect_symbol(Sym::RBrace)?;

        self.writer.write_goto(&l_end);
        self.writer.write_label(&l_else);

        if self.peek_is_keyword(Keyword::Else) {
            self.expect_keyword(Keyword::Else)?;
            self.expect_symbol(Sym::LBrace)?;
            self.compile_statements()?;
            self.expect_symbol(Sym::RBrace)?;
        }

        self.writer.write_label(&l_end);
        Ok(())
    }

    /// `'while' '(' expression ')' '{' statements '}'`
    fn compile_while(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::While)?;

        let (l_loop, l_exit) = self.next_label_pair();
        self.writer.write_label(&l_loop);

        self.expect_symbol(Sym::LParen)?;
        self.compile_expression()?;
        self.expect_symbol(Sym::RParen)?;

        self.writer.write_arithmetic(Command::Not);
        self.writer.write_if(&l_exit);

        self.expect_symbol(Sym::LBrace)?;
        self.compile_statements()?;
        self.expect_symbol(Sym::RBrace)?;

        self.writer.write_goto(&l_loop);
        self.writer.write_label(&l_exit);
        Ok(())
    }

    /// `'do' subroutineCall ';'`
    fn compile_do(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Do)?;
        self.compile_subroutine_call()?;
        self.expect_symbol(Sym::Semicolon)?;
        self.writer.write_pop(Segment::Temp, 0);
        Ok(())
    }

    /// `'return' expression? ';'`
    fn compile_return(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Return)?;
        if self.peek_is_symbol(Sym::Semicolon) {
            self.writer.write_constant(0);
        } else {
            self.compile_expression()?;
        }
        self.expect_symbol(Sym::Semicolon)?;
        self.writer.write_return();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::CompilationEngine;

    #[test]
    fn if_else_emits_two_labels_and_a_goto() {
        let out = CompilationEngine::new(
            "class A { function int f(int x) { if (x) { return 1; } else { return 0; } } }",
        )
        .compile()
        .unwrap();
        assert_eq!(
            out,
            "function A.f 0\n\
             \tpush argument 0\n\
             \tnot\n\
             \tif-goto L0\n\
             \tpush constant 1\n\
             \treturn\n\
             \tgoto L1\n\
             label L0\n\
             \tpush constant 0\n\
             \treturn\n\
             label L1\n"
        );
    }

    #[test]
    fn while_emits_loop_then_exit_label() {
        let out = CompilationEngine::new(
            "class A { function void f() { var int x; while (true) { let x = 1; } return; } }",
        )
        .compile()
        .unwrap();
        assert!(out.contains("label L0\n"));
        assert!(out.contains("\tif-goto L1\n"));
        assert!(out.contains("\tgoto L0\n"));
        assert!(out.contains("label L1\n"));
    }

    #[test]
    fn do_statement_discards_return_value() {
        let out = CompilationEngine::new(
            "class A { function void f() { do Output.println(); return; } }",
        )
        .compile()
        .unwrap();
        assert!(out.contains("\tcall Output.println 0\n\tpop temp 0\n"));
    }

    #[test]
    fn void_return_pushes_constant_zero() {
        let out = CompilationEngine::new("class A { function void f() { return; } }")
            .compile()
            .unwrap();
        assert!(out.ends_with("\tpush constant 0\n\treturn\n"));
    }

    #[test]
    fn array_assignment_matches_expected_stash_protocol() {
        let out = CompilationEngine::new(
            "class A { function void f(Array a, int i, int j) { let a[i] = a[j]; return; } }",
        )
        .compile()
        .unwrap();
        assert_eq!(
            out,
            "function A.f 0\n\
             \tpush argument 0\n\
             \tpush argument 1\n\
             \tadd\n\
             \tpush argument 0\n\
             \tpush argument 2\n\
             \tadd\n\
             \tpop pointer 1\n\
             \tpush that 0\n\
             \tpop temp 0\n\
             \tpop pointer 1\n\
             \tpush temp 0\n\
             \tpop that 0\n\
             \tpush constant 0\n\
             \treturn\n"
        );
    }

    #[test]
    fn let_of_undefined_variable_is_a_symbol_error() {
        let err = CompilationEngine::new("class A { function void f() { let x = 1; return; } }")
            .compile()
            .unwrap_err();
        assert_eq!(err.to_string(), "Undefined symbol: x");
    }
}
