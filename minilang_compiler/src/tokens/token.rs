//! Token model for minilang
//!
//! A closed set of kinds plus the matched source text. The lexeme of every
//! token except `EndOfInput` is exactly the text the lexer consumed.
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every token kind the lexer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords
    Int,
    Print,

    // Atoms
    Identifier,
    Number,

    // Operators
    Assign, // =
    Plus,   // +
    Minus,  // -
    Mult,   // *
    Div,    // /

    // Punctuation
    LParen,    // (
    RParen,    // )
    Semicolon, // ;

    EndOfInput,
}

impl TokenKind {
    /// Name used in token listings and "Expected ..." messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Print => "PRINT",
            Self::Identifier => "ID",
            Self::Number => "NUMBER",
            Self::Assign => "ASSIGN",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Mult => "MULT",
            Self::Div => "DIV",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Semicolon => "SEMICOLON",
            Self::EndOfInput => "EOF",
        }
    }

    /// Kind of a single-character operator or punctuation symbol
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '=' => Some(Self::Assign),
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Mult),
            '/' => Some(Self::Div),
            '(' => Some(Self::LParen),
            ')' => Some(Self::RParen),
            ';' => Some(Self::Semicolon),
            _ => None,
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Self::Int | Self::Print)
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::Assign | Self::Plus | Self::Minus | Self::Mult | Self::Div
        )
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(self, Self::LParen | Self::RParen | Self::Semicolon)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A classified lexeme with its source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// The terminator appended after the last real token
    pub fn end_of_input(span: Span) -> Self {
        Self {
            kind: TokenKind::EndOfInput,
            lexeme: String::new(),
            span,
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

impl fmt::Display for Token {
    /// Renders as `(KIND , lexeme)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} , {})", self.kind.display_name(), self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(TokenKind::Identifier.to_string(), "ID");
        assert_eq!(TokenKind::Semicolon.to_string(), "SEMICOLON");
        assert_eq!(TokenKind::EndOfInput.to_string(), "EOF");
    }

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(TokenKind::from_symbol('*'), Some(TokenKind::Mult));
        assert_eq!(TokenKind::from_symbol(';'), Some(TokenKind::Semicolon));
        assert_eq!(TokenKind::from_symbol('@'), None);
        assert_eq!(TokenKind::from_symbol('%'), None);
    }

    #[test]
    fn test_classification() {
        assert!(TokenKind::Print.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
        assert!(TokenKind::Div.is_operator());
        assert!(TokenKind::RParen.is_punctuation());
    }

    #[test]
    fn test_token_rendering() {
        let token = Token::new(TokenKind::Int, "int", Span::dummy());
        assert_eq!(token.to_string(), "(INT , int)");

        let eof = Token::end_of_input(Span::dummy());
        assert!(eof.is_end_of_input());
        assert_eq!(eof.to_string(), "(EOF , )");
    }
}
