//! Recursive-descent parser and code emitter.
//!
//! Parsing and emission happen in a single pass: declarations feed the
//! symbol table, statements and expressions emit instructions as they are
//! recognized, and forward jumps are backpatched from indices held in the
//! locals of the very call that emitted them. Diagnostics are recorded and
//! parsing continues, so one run can surface more than one mistake.

use crate::{
    code::{CodeBuffer, Instruction, Opcode},
    error::{CompileError, LimitError},
    lexer::{Token, TokenKind, Tokens},
    symbols::{Symbol, SymbolKind, SymbolTable},
};

/// Deepest allowed procedure nesting; the program block is level 0.
pub const MAX_LEXI_LEVELS: usize = 3;

/// Largest literal a factor may carry.
pub const MAX_NUMBER: i64 = 2047;

/// What a parse leaves behind: the emitted stream and every diagnostic.
#[derive(Debug)]
pub struct Parsed {
    pub code: Vec<Instruction>,
    pub errors: Vec<CompileError>,
}

pub struct Parser {
    tokens: Tokens,
    current: Token,
    table: SymbolTable,
    code: CodeBuffer,
    errors: Vec<CompileError>,
}

impl Parser {
    pub fn new(tokens: impl Into<Tokens>) -> Self {
        Self {
            tokens: tokens.into(),
            current: Token::null(),
            table: SymbolTable::new(),
            code: CodeBuffer::new(),
            errors: vec![],
        }
    }

    pub fn parse(mut self) -> Result<Parsed, LimitError> {
        self.program();

        if self.code.overflowed() {
            return Err(LimitError::instructions());
        }
        if self.table.overflowed() {
            return Err(LimitError::symbols());
        }

        Ok(Parsed {
            code: self.code.into_vec(),
            errors: self.errors,
        })
    }

    /// A drained stream hands out `nulsym` forever, which matches no
    /// grammar production and funnels truncated programs into error 9.
    fn next(&mut self) {
        self.current = self.tokens.next().unwrap_or_else(Token::null);
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn error(&mut self, code: u32) {
        self.errors.push(CompileError::new(code));
    }

    fn program(&mut self) {
        self.next();
        self.block(0, 0);

        if !self.at(TokenKind::Period) {
            self.error(9);
        }

        self.code.emit(Opcode::SioHalt, 0, 0, 3);
    }

    /// `tx` doubles as the owning procedure's symbol index: the parent
    /// enters the procedure as its newest symbol and hands its table top to
    /// the sub-block. Index 0 (the sentinel) owns the program block.
    fn block(&mut self, level: usize, mut tx: usize) {
        if level > MAX_LEXI_LEVELS {
            self.error(26);
        }

        let mark = tx;
        let mut dx: usize = 4;

        // Until declarations are done, the owner's address is the pending
        // jump below, so a recursive call emitted inside the body lands on
        // a jump that reaches the real entry.
        let jump = self.code.here();
        self.table.set_addr(mark, jump);
        self.code.emit(Opcode::Jmp, 0, 0, 0);

        while self.at(TokenKind::Const) || self.at(TokenKind::Var) || self.at(TokenKind::Procedure)
        {
            if self.at(TokenKind::Const) {
                self.const_declarations(level, &mut tx);
            }
            if self.at(TokenKind::Var) {
                self.var_declarations(level, &mut tx, &mut dx);
            }
            while self.at(TokenKind::Procedure) {
                self.procedure_declaration(level, &mut tx);
            }
        }

        let entry = self.code.here();
        self.code.patch_m(jump, entry as i64);
        self.table.set_addr(mark, entry);
        self.code.emit(Opcode::Inc, 0, 0, dx as i64);

        self.statement(level, tx);
    }

    /// `'const' ident '=' num { ',' ident '=' num } ';'`
    fn const_declarations(&mut self, level: usize, tx: &mut usize) {
        self.next();

        loop {
            self.const_declaration(level, tx);

            if self.at(TokenKind::Comma) {
                self.next();
            } else {
                break;
            }
        }

        if self.at(TokenKind::Semicolon) {
            self.next();
        } else {
            self.error(5);
        }
    }

    fn const_declaration(&mut self, level: usize, tx: &mut usize) {
        if !self.at(TokenKind::Ident) {
            self.error(4);
            return;
        }

        let name = self.current.text.clone();
        self.next();

        if self.at(TokenKind::Becomes) {
            // `:=` where `=` belongs: complain, then read it as `=`.
            self.error(1);
        } else if !self.at(TokenKind::Eql) {
            self.error(3);
            return;
        }
        self.next();

        if self.at(TokenKind::Number) {
            let value = self.number_value();
            *tx += 1;
            self.table.place(*tx, Symbol::constant(name, value, level));
            self.next();
        } else {
            self.error(2);
        }
    }

    /// `'var' ident { ',' ident } ';'`
    fn var_declarations(&mut self, level: usize, tx: &mut usize, dx: &mut usize) {
        self.next();

        loop {
            if self.at(TokenKind::Ident) {
                *tx += 1;
                self.table
                    .place(*tx, Symbol::variable(self.current.text.clone(), level, *dx));
                *dx += 1;
                self.next();
            } else {
                self.error(4);
                break;
            }

            if self.at(TokenKind::Comma) {
                self.next();
            } else {
                break;
            }
        }

        if self.at(TokenKind::Semicolon) {
            self.next();
        } else {
            self.error(5);
        }
    }

    /// `'procedure' ident ';' block ';'`
    fn procedure_declaration(&mut self, level: usize, tx: &mut usize) {
        self.next();

        if self.at(TokenKind::Ident) {
            *tx += 1;
            self.table
                .place(*tx, Symbol::procedure(self.current.text.clone(), level));
            self.next();
        } else {
            self.error(4);
        }

        if self.at(TokenKind::Semicolon) {
            self.next();
        } else {
            self.error(5);
        }

        self.block(level + 1, *tx);
        self.code.emit(Opcode::Rtn, 0, 0, 0);

        if self.at(TokenKind::Semicolon) {
            self.next();
        } else {
            self.error(5);
        }
    }

    fn statement(&mut self, level: usize, tx: usize) {
        match self.current.kind {
            TokenKind::Ident => {
                let i = self.table.position(&self.current.text, tx, level);
                let mut target = 0;

                if i == 0 {
                    self.error(11);
                } else if self.table.get(i).kind != SymbolKind::Variable {
                    self.error(12);
                } else {
                    target = i;
                }

                self.next();
                if self.at(TokenKind::Becomes) {
                    self.next();
                } else {
                    self.error(13);
                }

                self.expression(level, tx, 0);

                if target != 0 {
                    let symbol = self.table.get(target);
                    let (sym_level, sym_addr) = (symbol.level, symbol.addr);
                    self.code
                        .emit(Opcode::Sto, 0, level - sym_level, sym_addr as i64);
                }
            }
            TokenKind::Call => {
                self.next();

                if !self.at(TokenKind::Ident) {
                    self.error(14);
                } else {
                    let i = self.table.position(&self.current.text, tx, level);

                    if i == 0 {
                        self.error(11);
                    } else {
                        let symbol = self.table.get(i);
                        let (kind, sym_level, sym_addr) =
                            (symbol.kind, symbol.level, symbol.addr);

                        if kind == SymbolKind::Procedure {
                            self.code
                                .emit(Opcode::Cal, 0, level - sym_level, sym_addr as i64);
                        } else {
                            self.error(15);
                        }
                    }

                    self.next();
                }
            }
            TokenKind::If => {
                self.next();
                self.condition(level, tx);

                if self.at(TokenKind::Then) {
                    self.next();
                } else {
                    self.error(16);
                }

                let jpc = self.code.emit(Opcode::Jpc, 0, 0, 0);
                self.statement(level, tx);

                if self.at(TokenKind::Else) {
                    self.next();

                    // The condition jump skips past the jump that closes
                    // the then-branch.
                    self.code.patch_m(jpc, (self.code.here() + 1) as i64);
                    let jmp = self.code.emit(Opcode::Jmp, 0, 0, 0);
                    self.statement(level, tx);
                    self.code.patch_m(jmp, self.code.here() as i64);
                } else {
                    self.code.patch_m(jpc, self.code.here() as i64);
                }
            }
            TokenKind::Begin => {
                self.next();
                self.statement(level, tx);

                while self.at(TokenKind::Semicolon) {
                    self.next();
                    self.statement(level, tx);
                }

                if self.at(TokenKind::End) {
                    self.next();
                } else {
                    self.error(17);
                }
            }
            TokenKind::While => {
                let top = self.code.here();
                self.next();
                self.condition(level, tx);

                let jpc = self.code.emit(Opcode::Jpc, 0, 0, 0);

                if self.at(TokenKind::Do) {
                    self.next();
                } else {
                    self.error(18);
                }

                self.statement(level, tx);
                self.code.emit(Opcode::Jmp, 0, 0, top as i64);
                self.code.patch_m(jpc, self.code.here() as i64);
            }
            TokenKind::Write => {
                self.next();
                self.expression(level, tx, 0);
                self.code.emit(Opcode::SioWrite, 0, 0, 1);
            }
            TokenKind::Read => {
                self.next();
                self.code.emit(Opcode::SioRead, 0, 0, 2);

                let i = if self.at(TokenKind::Ident) {
                    self.table.position(&self.current.text, tx, level)
                } else {
                    0
                };

                if i == 0 {
                    self.error(11);
                } else if self.table.get(i).kind != SymbolKind::Variable {
                    self.error(12);
                } else {
                    let symbol = self.table.get(i);
                    let (sym_level, sym_addr) = (symbol.level, symbol.addr);
                    self.code
                        .emit(Opcode::Sto, 0, level - sym_level, sym_addr as i64);
                }

                self.next();
            }
            // The empty statement.
            _ => {}
        }
    }

    /// Conditions always target register 0, so the `jpc 0 0 ?` emitted by
    /// `if` and `while` tests the right place.
    fn condition(&mut self, level: usize, tx: usize) {
        if self.at(TokenKind::Odd) {
            self.next();
            self.expression(level, tx, 0);
            self.code.emit(Opcode::Odd, 0, 0, 0);
            return;
        }

        self.expression(level, tx, 0);

        let op = match self.current.kind {
            TokenKind::Eql => Opcode::Eql,
            TokenKind::Neq => Opcode::Neq,
            TokenKind::Less => Opcode::Lss,
            TokenKind::Leq => Opcode::Leq,
            TokenKind::Gtr => Opcode::Gtr,
            TokenKind::Geq => Opcode::Geq,
            _ => {
                self.error(20);
                return;
            }
        };

        self.next();
        self.expression(level, tx, 1);
        self.code.emit(op, 0, 0, 1);
    }

    /// Compiles a value into register `r`, using registers above `r` for
    /// the right-hand sides of nested operators.
    fn expression(&mut self, level: usize, tx: usize, r: usize) {
        if self.at(TokenKind::Plus) || self.at(TokenKind::Minus) {
            let negate = self.at(TokenKind::Minus);
            self.next();
            self.term(level, tx, r);

            if negate {
                self.code.emit(Opcode::Neg, r, 0, 0);
            }
        } else {
            self.term(level, tx, r);
        }

        while self.at(TokenKind::Plus) || self.at(TokenKind::Minus) {
            let op = if self.at(TokenKind::Plus) {
                Opcode::Add
            } else {
                Opcode::Sub
            };

            self.next();
            self.term(level, tx, r + 1);
            self.code.emit(op, r, r, (r + 1) as i64);
        }
    }

    fn term(&mut self, level: usize, tx: usize, r: usize) {
        self.factor(level, tx, r);

        while self.at(TokenKind::Times) || self.at(TokenKind::Slash) {
            let op = if self.at(TokenKind::Times) {
                Opcode::Mul
            } else {
                Opcode::Div
            };

            self.next();
            self.factor(level, tx, r + 1);
            self.code.emit(op, r, r, (r + 1) as i64);
        }
    }

    fn factor(&mut self, level: usize, tx: usize, r: usize) {
        match self.current.kind {
            TokenKind::Ident => {
                let i = self.table.position(&self.current.text, tx, level);

                if i == 0 {
                    self.error(11);
                } else {
                    let symbol = self.table.get(i);
                    let (kind, value, sym_level, sym_addr) =
                        (symbol.kind, symbol.value, symbol.level, symbol.addr);

                    match kind {
                        SymbolKind::Constant => {
                            self.code.emit(Opcode::Lit, r, 0, value);
                        }
                        SymbolKind::Variable => {
                            self.code
                                .emit(Opcode::Lod, r, level - sym_level, sym_addr as i64);
                        }
                        SymbolKind::Procedure => {
                            self.error(21);
                        }
                    }
                }

                self.next();
            }
            TokenKind::Number => {
                let mut value = self.number_value();

                if value > MAX_NUMBER {
                    self.error(25);
                    value = 0;
                }

                self.code.emit(Opcode::Lit, r, 0, value);
                self.next();
            }
            TokenKind::LParen => {
                self.next();
                self.expression(level, tx, r);

                if self.at(TokenKind::RParen) {
                    self.next();
                } else {
                    self.error(22);
                }
            }
            _ => self.error(23),
        }
    }

    /// Oversized lexemes were already reported by the lexer; saturating here
    /// keeps them over the literal ceiling so the factor check fires too.
    fn number_value(&self) -> i64 {
        self.current.text.parse::<i64>().unwrap_or(i64::MAX)
    }
}
