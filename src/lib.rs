//! Compiler and stack virtual machine for the PL/0 teaching language.
//!
//! One pass takes source text to an executable instruction stream: the lexer
//! feeds the recursive-descent parser, which drives the symbol table and the
//! code emitter (backpatching forward jumps in place), and the machine in
//! [`vm`] executes the result.

pub mod code;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod report;
pub mod symbols;
pub mod vm;

use code::Instruction;
use error::{CompileError, LimitError};
use lexer::{trim_comments, Lexer, Token};
use parser::Parser;

/// Everything a single compilation produces.
#[derive(Debug)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub code: Vec<Instruction>,
    pub errors: Vec<CompileError>,
}

impl Compilation {
    /// Whether the machine may run this program.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the whole front end: comment stripping, lexing, parsing, emission.
///
/// Numbered diagnostics land in [`Compilation::errors`] (lexical ones first,
/// the order they were recorded in); only a capacity blowout aborts.
pub fn compile(source: &str) -> Result<Compilation, LimitError> {
    let stripped = trim_comments(source);
    let (tokens, mut errors) = Lexer::new(&stripped).lex();
    let parsed = Parser::new(tokens.clone()).parse()?;
    errors.extend(parsed.errors);

    Ok(Compilation {
        tokens,
        code: parsed.code,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_collects_lexical_and_syntax_errors_in_order() {
        let compilation = compile("var verylongidentifier; begin y := 1 end.").unwrap();
        let codes: Vec<u32> = compilation.errors.iter().map(|e| e.code()).collect();

        assert_eq!(codes, vec![26, 11]);
    }

    #[test]
    fn test_compile_strips_comments_before_lexing() {
        let compilation = compile("var x; /* not code: @ $ */ begin x := 1 end.").unwrap();

        assert!(compilation.is_clean());
    }

    #[test]
    fn test_clean_compilation_ends_in_halt() {
        let compilation = compile("begin end.").unwrap();

        assert!(compilation.is_clean());
        assert_eq!(
            compilation.code.last().map(|i| i.op),
            Some(code::Opcode::SioHalt)
        );
    }
}
