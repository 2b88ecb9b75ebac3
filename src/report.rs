//! Writers for the artifacts selected on the command line.

use std::io::{self, Write};

use crate::{
    code::Instruction,
    error::CompileError,
    lexer::{Token, TokenKind},
};

/// The `-l` report: the numeric token stream (identifiers and numbers
/// followed by their lexeme), the symbolic category names ten per line, and
/// the success footer.
pub fn write_lexemes(out: &mut dyn Write, tokens: &[Token]) -> io::Result<()> {
    writeln!(out, "List of lexemes:")?;
    for token in tokens {
        write!(out, "{} ", token.kind.code())?;
        if matches!(token.kind, TokenKind::Ident | TokenKind::Number) {
            write!(out, "{} ", token.text)?;
        }
    }
    writeln!(out)?;
    writeln!(out)?;

    writeln!(out, "Symbolic representation:")?;
    for (i, token) in tokens.iter().enumerate() {
        write!(out, "{}", token.kind.name())?;
        if (i + 1) % 10 == 0 {
            writeln!(out)?;
        } else {
            write!(out, " ")?;
        }
    }
    writeln!(out)?;
    writeln!(out)?;

    writeln!(out, "No errors, program is syntactically correct")?;
    Ok(())
}

/// The `-a` report: one `op r l m` quadruple per line.
pub fn write_assembly(out: &mut dyn Write, code: &[Instruction]) -> io::Result<()> {
    writeln!(out, "Generated code:")?;
    for instruction in code {
        writeln!(out, "{instruction}")?;
    }
    writeln!(out)?;
    Ok(())
}

/// One fixed message per recorded diagnostic, then the failure banner.
pub fn write_errors(out: &mut dyn Write, errors: &[CompileError]) -> io::Result<()> {
    for error in errors {
        writeln!(out, "{error}")?;
    }
    writeln!(out, "Error(s), program is not syntactically correct")?;
    Ok(())
}
