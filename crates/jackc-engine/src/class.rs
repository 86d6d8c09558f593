//! `class` and `classVarDec`.

use jackc_lex::{Keyword, Sym};
use jackc_sym::Segment;
use jackc_util::CompileResult;

use crate::CompilationEngine;

impl CompilationEngine {
    /// `'class' className '{' classVarDec* subroutineDec* '}'`
    pub(crate) fn compile_class(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Class)?;
        self.class_name = self.expect_identifier()?;
        self.expect_symbol(Sym::LBrace)?;

        while self.peek_is_keyword(Keyword::Static) || self.peek_is_keyword(Keyword::Field) {
            self.compile_class_var_dec()?;
        }

        while self.peek_is_keyword(Keyword::Constructor)
            || self.peek_is_keyword(Keyword::Function)
            || self.peek_is_keyword(Keyword::Method)
        {
            self.compile_subroutine()?;
        }

        self.expect_symbol(Sym::RBrace)?;
        Ok(())
    }

    /// `('static'|'field') type varName (',' varName)* ';'`
    fn compile_class_var_dec(&mut self) -> CompileResult<()> {
        let segment = if self.peek_is_keyword(Keyword::Static) {
            self.expect_keyword(Keyword::Static)?;
            Segment::Static
        } else {
            self.expect_keyword(Keyword::Field)?;
            Segment::Field
        };

        let declared_type = self.expect_type("var type")?;

        loop {
            let name = self.expect_identifier()?;
            self.class_table.define(&name, &declared_type, segment);
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
    fn empty_class_emits_nothing() {
        let out = CompilationEngine::new("class Empty {}").compile().unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn class_var_decs_populate_class_table_not_output() {
        let out = CompilationEngine::new("class A { static int x; field boolean y, z; }")
            .compile()
            .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn missing_class_keyword_is_a_token_mismatch() {
        let err = CompilationEngine::new("Foo {}").compile().unwrap_err();
        assert_eq!(err.to_string(), "Expected token: class. Got: Foo");
    }

    #[test]
    fn missing_closing_brace_is_reported() {
        let err = CompilationEngine::new("class A {").compile().unwrap_err();
        assert_eq!(err.to_string(), "Expected token: }. Got: end of file");
    }

    #[test]
    fn bad_class_var_dec_type_reports_var_type() {
        let err = CompilationEngine::new("class A { field 5 x; }").compile().unwrap_err();
        assert_eq!(err.to_string(), "Expected token of type: var type. Got: 5");
    }
}
