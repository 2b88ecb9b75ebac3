use std::{error::Error, fmt::Display};

/// Numbered diagnostic recorded by the lexer or the parser.
///
/// The compiler keeps going after recording one of these, so a single run can
/// collect several; the first one decides the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileError {
    code: u32,
}

impl CompileError {
    pub fn new(code: u32) -> Self {
        debug_assert!((1..=27).contains(&code));
        Self { code }
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn message(&self) -> &'static str {
        match self.code {
            1 => "Use = instead of :=",
            2 => "= must be followed by a number",
            3 => "Identifier must be followed by =",
            4 => "const, var, procedure must be followed by identifier",
            5 => "Semicolon or comma missing",
            6 => "Incorrect symbol after procedure declaration",
            7 => "Statement expected",
            8 => "Incorrect symbol after statement part in block",
            9 => "Period expected",
            10 => "Semicolon between statements missing",
            11 => "Undeclared identifier",
            12 => "Assignment to constant or procedure is not allowed",
            13 => "Assignment operator expected",
            14 => "Call must be followed by an identifier",
            15 => "Call of a constant or variable is meaningless",
            16 => "Then expected",
            17 => "Semicolon or } expected",
            18 => "Do expected",
            19 => "Incorrect symbol following statement",
            20 => "Relational operator expected",
            21 => "Expression must not contain a procedure identifier",
            22 => "Right parenthesis missing",
            23 => "The preceding factor cannot begin with this symbol",
            24 => "An expression cannot begin with this symbol",
            25 => "This number is too large",
            26 => "Identifier too long",
            27 => "Invalid symbol",
            _ => "Invalid instruction",
        }
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for CompileError {}

/// Fatal capacity violation: the program is too large for one of the fixed
/// compiler tables. Unlike [`CompileError`] this aborts the compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitError {
    what: &'static str,
    limit: usize,
}

impl LimitError {
    pub fn instructions() -> Self {
        Self {
            what: "instruction buffer",
            limit: crate::code::MAX_CODE_LENGTH,
        }
    }

    pub fn symbols() -> Self {
        Self {
            what: "symbol table",
            limit: crate::symbols::MAX_SYMBOL_TABLE_SIZE,
        }
    }
}

impl Display for LimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "program exceeds the {} capacity of {}",
            self.what, self.limit
        )
    }
}

impl Error for LimitError {}
