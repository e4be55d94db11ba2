//! Grammar symbols for minilang
//!
//! Terminals render as their source spelling, with `id` and `num` standing
//! for any identifier or number. Nonterminals render as their names.
use crate::tokens::TokenKind;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terminal {
    Int,
    Print,
    Id,
    Num,
    Assign,
    Plus,
    Minus,
    Mult,
    Div,
    LParen,
    RParen,
    Semicolon,
}

impl Terminal {
    /// Spelling used in sentential forms
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Print => "print",
            Self::Id => "id",
            Self::Num => "num",
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mult => "*",
            Self::Div => "/",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Semicolon => ";",
        }
    }

    /// How the terminal is named in "expected" lists
    pub const fn expected_name(self) -> &'static str {
        match self {
            Self::Int => "'int'",
            Self::Print => "'print'",
            Self::Id => "ID",
            Self::Num => "NUMBER",
            Self::Assign => "'='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Mult => "'*'",
            Self::Div => "'/'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Semicolon => "';'",
        }
    }

    /// `EndOfInput` has no terminal; the grammar never mentions it
    pub const fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(Self::Int),
            TokenKind::Print => Some(Self::Print),
            TokenKind::Identifier => Some(Self::Id),
            TokenKind::Number => Some(Self::Num),
            TokenKind::Assign => Some(Self::Assign),
            TokenKind::Plus => Some(Self::Plus),
            TokenKind::Minus => Some(Self::Minus),
            TokenKind::Mult => Some(Self::Mult),
            TokenKind::Div => Some(Self::Div),
            TokenKind::LParen => Some(Self::LParen),
            TokenKind::RParen => Some(Self::RParen),
            TokenKind::Semicolon => Some(Self::Semicolon),
            TokenKind::EndOfInput => None,
        }
    }

    pub const fn token_kind(self) -> TokenKind {
        match self {
            Self::Int => TokenKind::Int,
            Self::Print => TokenKind::Print,
            Self::Id => TokenKind::Identifier,
            Self::Num => TokenKind::Number,
            Self::Assign => TokenKind::Assign,
            Self::Plus => TokenKind::Plus,
            Self::Minus => TokenKind::Minus,
            Self::Mult => TokenKind::Mult,
            Self::Div => TokenKind::Div,
            Self::LParen => TokenKind::LParen,
            Self::RParen => TokenKind::RParen,
            Self::Semicolon => TokenKind::Semicolon,
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nonterminal {
    Program,
    StatementList,
    Statement,
    Declaration,
    Assignment,
    PrintStmt,
    Expr,
    ExprPrime,
    Term,
    TermPrime,
    Factor,
}

impl Nonterminal {
    pub const ALL: [Nonterminal; 11] = [
        Self::Program,
        Self::StatementList,
        Self::Statement,
        Self::Declaration,
        Self::Assignment,
        Self::PrintStmt,
        Self::Expr,
        Self::ExprPrime,
        Self::Term,
        Self::TermPrime,
        Self::Factor,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Program => "Program",
            Self::StatementList => "StatementList",
            Self::Statement => "Statement",
            Self::Declaration => "Declaration",
            Self::Assignment => "Assignment",
            Self::PrintStmt => "PrintStmt",
            Self::Expr => "Expr",
            Self::ExprPrime => "ExprPrime",
            Self::Term => "Term",
            Self::TermPrime => "TermPrime",
            Self::Factor => "Factor",
        }
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a sentential form or production body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    Nonterminal(Nonterminal),
}

impl Symbol {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Terminal(t) => t.as_str(),
            Self::Nonterminal(n) => n.as_str(),
        }
    }

    pub const fn is_nonterminal(self) -> bool {
        matches!(self, Self::Nonterminal(_))
    }

    pub const fn as_nonterminal(self) -> Option<Nonterminal> {
        match self {
            Self::Nonterminal(n) => Some(n),
            Self::Terminal(_) => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Self {
        Self::Terminal(t)
    }
}

impl From<Nonterminal> for Symbol {
    fn from(n: Nonterminal) -> Self {
        Self::Nonterminal(n)
    }
}

// Symbols serialize as their rendered spelling
impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for Nonterminal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Render a sentential form as space-separated spellings
pub fn render_form(form: &[Symbol]) -> String {
    form.iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_kind_mapping_round_trips() {
        for terminal in [
            Terminal::Int,
            Terminal::Id,
            Terminal::Num,
            Terminal::Div,
            Terminal::Semicolon,
        ] {
            assert_eq!(Terminal::from_kind(terminal.token_kind()), Some(terminal));
        }
        assert_eq!(Terminal::from_kind(TokenKind::EndOfInput), None);
    }

    #[test]
    fn test_spellings() {
        assert_eq!(Terminal::Num.to_string(), "num");
        assert_eq!(Terminal::Id.expected_name(), "ID");
        assert_eq!(Nonterminal::PrintStmt.to_string(), "PrintStmt");
        assert_eq!(Symbol::from(Terminal::LParen).to_string(), "(");
    }

    #[test]
    fn test_render_form() {
        let form = [
            Symbol::from(Terminal::Int),
            Symbol::from(Terminal::Id),
            Symbol::from(Terminal::Semicolon),
            Symbol::from(Nonterminal::StatementList),
        ];
        assert_eq!(render_form(&form), "int id ; StatementList");
        assert_eq!(render_form(&[]), "");
    }

    #[test]
    fn test_nonterminal_names_are_unique() {
        let mut names: Vec<_> = Nonterminal::ALL.iter().map(|n| n.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Nonterminal::ALL.len());
    }
}
