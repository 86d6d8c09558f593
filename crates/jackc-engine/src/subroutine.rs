//! `subroutineDec`, `parameterList`, `subroutineBody`, `varDec`.

use jackc_lex::Keyword;
use jackc_lex::Sym;
use jackc_sym::Segment;
use jackc_util::CompileResult;
use tracing::debug;

use crate::CompilationEngine;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

impl CompilationEngine {
    /// `('constructor'|'function'|'method') ('void'|type) subroutineName '(' parameterList ')' subroutineBody`
    pub(crate) fn compile_subroutine(&mut self) -> CompileResult<()> {
        self.subroutine_table.reset();

        let kind = if self.peek_is_keyword(Keyword::Constructor) {
            self.expect_keyword(Keyword::Constructor)?;
            SubroutineKind::Constructor
        } else if self.peek_is_keyword(Keyword::Function) {
            self.expect_keyword(Keyword::Function)?;
            SubroutineKind::Function
        } else {
            self.expect_keyword(Keyword::Method)?;
            SubroutineKind::Method
        };

        if kind == SubroutineKind::Method {
            let class_name = self.class_name.clone();
            self.subroutine_table.define_this(&class_name);
        }

        self.expect_return_type()?;
        let name = self.expect_identifier()?;
        debug!(class = %self.class_name, subroutine = %name, "entering subroutine");

        self.expect_symbol(Sym::LParen)?;
        self.compile_parameter_list()?;
        self.expect_symbol(Sym::RParen)?;

        self.compile_subroutine_body(kind, &name)?;

        let mut dump = String::new();
        self.subroutine_table
            .dump("subroutine", &mut dump)
            .expect("writing to a String cannot fail");
        self.subroutine_dumps.push(dump);

        Ok(())
    }

    /// `((type varName) (',' type varName)*)?`
    fn compile_parameter_list(&mut self) -> CompileResult<()> {
        if self.peek_is_symbol(Sym::RParen) {
            return Ok(());
        }

        loop {
            let declared_type = self.expect_type("var type")?;
            let name = self.expect_identifier()?;
            self.subroutine_table.define(&name, &declared_type, Segment::Arg);
            if self.peek_is_symbol(Sym::Comma) {
                self.expect_symbol(Sym::Comma)?;
                continue;
            }
            break;
        }
        Ok(())
    }

    /// `'{' varDec* statements '}'`
    fn compile_subroutine_body(&mut self, kind: SubroutineKind, name: &str) -> CompileResult<()> {
        self.expect_symbol(Sym::LBrace)?;

        while self.peek_is_keyword(Keyword::Var) {
            self.compile_var_dec()?;
        }

        let n_locals = self.subroutine_table.count(Segment::Local);
        self.writer.write_function(&format!("{}.{}", self.class_name, name), n_locals);

        match kind {
            SubroutineKind::Constructor => {
                let n_fields = self.class_table.count(Segment::Field);
                self.writer.write_constant(n_fields);
                self.writer.write_call("Memory.alloc", 1);
                self.writer.write_pop_this_ptr();
            }
            SubroutineKind::Method => {
                self.writer.write_push(Segment::Arg, 0);
                self.writer.write_pop_this_ptr();
            }
            SubroutineKind::Function => {}
        }

        self.compile_statements()?;
        self.expect_symbol(Sym::RBrace)?;
        Ok(())
    }

    /// `'var' type varName (',' varName)* ';'`
    fn compile_var_dec(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Var)?;
        let declared_type = self.expect_type("var type")?;

        loop {
            let name = self.expect_identifier()?;
            self.subroutine_table.define(&name, &declared_type, Segment::Local);
            if self.peek_is_symbol(Sym::Comma) {
                self.expect_symbol(Sym::Comma)?;
                continue;
            }
            break;
        }

        self.expect_symbol(Sym::Semicolon)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::CompilationEngine;

    #[test]
    fn function_has_no_prologue() {
        let out = CompilationEngine::new("class A { function void f() { return; } }")
            .compile()
            .unwrap();
        assert_eq!(out, "function A.f 0\n\tpush constant 0\n\treturn\n");
    }

    #[test]
    fn method_prologue_binds_this_from_argument_zero() {
        let out = CompilationEngine::new("class A { method void f() { return; } }")
            .compile()
            .unwrap();
        assert_eq!(
            out,
            "function A.f 0\n\tpush argument 0\n\tpop pointer 0\n\tpush constant 0\n\treturn\n"
        );
    }

    #[test]
    fn constructor_prologue_allocates_field_count() {
        let out = CompilationEngine::new(
            "class P { field int x, y; constructor P new() { return this; } }",
        )
        .compile()
        .unwrap();
        assert_eq!(
            out,
            "function P.new 0\n\tpush constant 2\n\tcall Memory.alloc 1\n\tpop pointer 0\n\tpush pointer 0\n\treturn\n"
        );
    }

    #[test]
    fn locals_count_into_function_header() {
        let out = CompilationEngine::new(
            "class A { function void f() { var int a, b; var boolean c; return; } }",
        )
        .compile()
        .unwrap();
        assert!(out.starts_with("function A.f 3\n"));
    }

    #[test]
    fn bad_return_type_reports_return_type_not_var_type() {
        let err = CompilationEngine::new("class A { function 5 f() { return; } }")
            .compile()
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected token of type: return type. Got: 5");
    }

    #[test]
    fn bad_parameter_type_reports_var_type() {
        let err = CompilationEngine::new("class A { function void f(5 x) { return; } }")
            .compile()
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected token of type: var type. Got: 5");
    }

    #[test]
    fn bad_var_dec_type_reports_var_type() {
        let err = CompilationEngine::new("class A { function void f() { var 5 x; return; } }")
            .compile()
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected token of type: var type. Got: 5");
    }
}
