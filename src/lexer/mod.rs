mod lexmap;
mod token;
mod tokens;

pub use lexmap::*;
pub use token::*;
pub use tokens::*;

use once_cell::sync::Lazy;
use std::{iter::Peekable, str::Chars};

use crate::error::CompileError;

pub const MAX_IDENT_LENGTH: usize = 11;
pub const MAX_NUM_LENGTH: usize = 5;

macro_rules! reserved {
    ($map:ident, $kind:ident, $value:expr) => {
        $map.insert($value, TokenKind::$kind);
    };
}

static RESERVED: Lazy<LexMap> = Lazy::new(|| {
    let mut m = LexMap::default();

    reserved!(m, Const, "const");
    reserved!(m, Var, "var");
    reserved!(m, Procedure, "procedure");
    reserved!(m, Call, "call");
    reserved!(m, Begin, "begin");
    reserved!(m, End, "end");
    reserved!(m, If, "if");
    reserved!(m, Then, "then");
    reserved!(m, Else, "else");
    reserved!(m, While, "while");
    reserved!(m, Do, "do");
    reserved!(m, Read, "read");
    reserved!(m, Write, "write");
    reserved!(m, Odd, "odd");

    m
});

/// Deletes every `/* ... */` block comment. Comments do not nest; an
/// unterminated comment swallows the rest of the input.
pub fn trim_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }

    out.push_str(rest);
    out
}

/// Walks the source text and classifies it into [`Token`]s.
///
/// Lexing never stops early: oversized identifiers and numbers, and
/// characters outside the alphabet, are recorded as numbered diagnostics and
/// the scan continues with the next character.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
    iterator: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iterator = input.chars().peekable();

        Self {
            tokens: vec![],
            errors: vec![],
            iterator,
        }
    }

    fn peek(&mut self) -> Option<&char> {
        self.iterator.peek()
    }

    fn next(&mut self) -> Option<char> {
        self.iterator.next()
    }

    fn next_if(&mut self, func: impl FnOnce(&char) -> bool) -> Option<char> {
        self.iterator.next_if(func)
    }

    fn eat_whitespace(&mut self) {
        while self.next_if(|item| item.is_whitespace()).is_some() {}
    }

    fn error(&mut self, code: u32) {
        self.errors.push(CompileError::new(code));
    }

    pub fn lex(mut self) -> (Vec<Token>, Vec<CompileError>) {
        loop {
            self.eat_whitespace();

            let Some(next) = self.peek() else {
                break;
            };

            match next {
                'a'..='z' | 'A'..='Z' => self.lex_word(),
                '0'..='9' => self.lex_number(),
                _ => self.lex_symbol(),
            }
        }

        (self.tokens, self.errors)
    }

    fn lex_word(&mut self) {
        let mut stack = vec![];

        while let Some(next) = self.next_if(|item| item.is_ascii_alphanumeric()) {
            stack.push(next);
        }

        let read = stack.iter().collect::<String>();

        if let Some(kind) = RESERVED.get(read.as_str()) {
            self.tokens.push(Token::new(kind, read));
        } else {
            if read.len() > MAX_IDENT_LENGTH {
                self.error(26);
            }
            self.tokens.push(Token::new(TokenKind::Ident, read));
        }
    }

    fn lex_number(&mut self) {
        let mut stack = vec![];

        while let Some(next) = self.next_if(|item| item.is_ascii_digit()) {
            stack.push(next);
        }

        let read = stack.iter().collect::<String>();

        if read.len() > MAX_NUM_LENGTH {
            self.error(25);
        }

        self.tokens.push(Token::new(TokenKind::Number, read));
    }

    fn lex_symbol(&mut self) {
        let Some(read) = self.next() else {
            return;
        };

        let (kind, text) = match read {
            '+' => (TokenKind::Plus, "+"),
            '-' => (TokenKind::Minus, "-"),
            '*' => (TokenKind::Times, "*"),
            '/' => (TokenKind::Slash, "/"),
            '(' => (TokenKind::LParen, "("),
            ')' => (TokenKind::RParen, ")"),
            '=' => (TokenKind::Eql, "="),
            ',' => (TokenKind::Comma, ","),
            '.' => (TokenKind::Period, "."),
            ';' => (TokenKind::Semicolon, ";"),
            '<' => {
                if self.next_if(|item| *item == '>').is_some() {
                    (TokenKind::Neq, "<>")
                } else if self.next_if(|item| *item == '=').is_some() {
                    (TokenKind::Leq, "<=")
                } else {
                    (TokenKind::Less, "<")
                }
            }
            '>' => {
                if self.next_if(|item| *item == '=').is_some() {
                    (TokenKind::Geq, ">=")
                } else {
                    (TokenKind::Gtr, ">")
                }
            }
            ':' => {
                // A colon always forms the assignment operator; the `=` is
                // consumed when present.
                self.next_if(|item| *item == '=');
                (TokenKind::Becomes, ":=")
            }
            _ => {
                self.error(27);
                return;
            }
        };

        self.tokens.push(Token::new(kind, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let (tokens, errors) = Lexer::new(input).lex();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_assignment() {
        let (tokens, errors) = Lexer::new("x := 7;").lex();

        assert!(errors.is_empty());
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Ident, "x"),
                Token::new(TokenKind::Becomes, ":="),
                Token::new(TokenKind::Number, "7"),
                Token::new(TokenKind::Semicolon, ";"),
            ]
        );
    }

    #[test]
    fn test_lex_reserved_words() {
        assert_eq!(
            kinds("const var procedure call begin end if then else while do read write odd"),
            vec![
                TokenKind::Const,
                TokenKind::Var,
                TokenKind::Procedure,
                TokenKind::Call,
                TokenKind::Begin,
                TokenKind::End,
                TokenKind::If,
                TokenKind::Then,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Do,
                TokenKind::Read,
                TokenKind::Write,
                TokenKind::Odd,
            ]
        );
    }

    #[test]
    fn test_lex_compound_operators() {
        assert_eq!(
            kinds("< <= <> > >= = :="),
            vec![
                TokenKind::Less,
                TokenKind::Leq,
                TokenKind::Neq,
                TokenKind::Gtr,
                TokenKind::Geq,
                TokenKind::Eql,
                TokenKind::Becomes,
            ]
        );
    }

    #[test]
    fn test_lone_colon_still_becomes_assignment() {
        let (tokens, errors) = Lexer::new("x : 1").lex();

        assert!(errors.is_empty());
        assert_eq!(tokens[1], Token::new(TokenKind::Becomes, ":="));
    }

    #[test]
    fn test_identifier_of_eleven_chars_is_fine() {
        let (tokens, errors) = Lexer::new("abcdefghijk").lex();

        assert!(errors.is_empty());
        assert_eq!(tokens[0].text, "abcdefghijk");
    }

    #[test]
    fn test_identifier_of_twelve_chars_is_too_long() {
        let (tokens, errors) = Lexer::new("abcdefghijkl").lex();

        assert_eq!(errors, vec![CompileError::new(26)]);
        assert_eq!(tokens[0].kind, TokenKind::Ident);
    }

    #[test]
    fn test_number_of_six_digits_is_too_large() {
        let (tokens, errors) = Lexer::new("123456").lex();

        assert_eq!(errors, vec![CompileError::new(25)]);
        assert_eq!(tokens[0].kind, TokenKind::Number);
    }

    #[test]
    fn test_invalid_symbol_is_reported_and_skipped() {
        let (tokens, errors) = Lexer::new("x @ y").lex();

        assert_eq!(errors, vec![CompileError::new(27)]);
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Ident, "x"),
                Token::new(TokenKind::Ident, "y"),
            ]
        );
    }

    #[test]
    fn test_empty_input_lexes_to_nothing() {
        let (tokens, errors) = Lexer::new("").lex();

        assert!(tokens.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_trim_comments() {
        assert_eq!(
            trim_comments("var x; /* the counter */ begin end."),
            "var x;  begin end."
        );
    }

    #[test]
    fn test_trim_unterminated_comment_swallows_the_rest() {
        assert_eq!(trim_comments("var x; /* oops"), "var x; ");
    }

    #[test]
    fn test_lexemes_round_trip() {
        let (tokens, _) = Lexer::new("while i <= 10 do i := i + 1").lex();
        let spelled: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(spelled, vec!["while", "i", "<=", "10", "do", "i", ":=", "i", "+", "1"]);
    }
}
