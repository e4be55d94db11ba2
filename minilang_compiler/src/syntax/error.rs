//! Syntax errors with log code mapping
//!
//! Messages follow the `Expected <construct>. Got token '<lexeme>'` shape so
//! the CLI can print them after a `Syntax error: ` prefix unchanged.

use crate::derivation::DerivationError;
use crate::grammar::Terminal;
use crate::logging::{codes, Code};
use crate::tokens::Token;
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Terminals that may begin a statement, in message order
pub const STATEMENT_START: [Terminal; 3] = [Terminal::Int, Terminal::Id, Terminal::Print];

/// Terminals that may begin a factor, in message order
pub const FACTOR_START: [Terminal; 3] = [Terminal::Id, Terminal::Num, Terminal::LParen];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Expected {expected}. Got token '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Expected {expected}. Got token '{found}'")]
    InvalidStatementStart {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Expected {expected}. Got token '{found}'")]
    InvalidFactor {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected token '{found}'. Expected {expected}")]
    TrailingInput {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Maximum nesting depth of {limit} exceeded at {span}")]
    MaxRecursionDepth { limit: usize, span: Span },

    #[error("Derivation exceeds {limit} {unit}")]
    DerivationTooLong { limit: usize, unit: &'static str },

    #[error("Internal parser error: {0}")]
    InvalidDerivation(#[from] DerivationError),
}

impl SyntaxError {
    /// `eat` mismatch: `expected` is a token kind name such as `SEMICOLON`
    pub fn unexpected_token(expected: &str, token: &Token) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: token.lexeme.clone(),
            span: token.span,
        }
    }

    /// Only reachable when `statement()` is entered directly; a full parse
    /// checks FIRST(Statement) first, so a bad start there becomes `TrailingInput`.
    pub fn invalid_statement_start(token: &Token) -> Self {
        Self::InvalidStatementStart {
            expected: expected_list(&STATEMENT_START),
            found: token.lexeme.clone(),
            span: token.span,
        }
    }

    pub fn invalid_factor(token: &Token) -> Self {
        Self::InvalidFactor {
            expected: expected_list(&FACTOR_START),
            found: token.lexeme.clone(),
            span: token.span,
        }
    }

    /// Input left over once `Program` is complete. Only another statement
    /// could have continued the program at that point.
    pub fn trailing_input(token: &Token) -> Self {
        Self::TrailingInput {
            expected: expected_list(&STATEMENT_START),
            found: token.lexeme.clone(),
            span: token.span,
        }
    }

    pub fn max_recursion_depth(limit: usize, span: Span) -> Self {
        Self::MaxRecursionDepth { limit, span }
    }

    pub fn derivation_too_long(limit: usize) -> Self {
        Self::DerivationTooLong {
            limit,
            unit: "steps",
        }
    }

    /// The rendered log would outgrow its byte budget
    pub fn derivation_log_too_large(limit: usize) -> Self {
        Self::DerivationTooLong {
            limit,
            unit: "bytes of rendered forms",
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::InvalidStatementStart { .. } => codes::syntax::INVALID_STATEMENT_START,
            Self::InvalidFactor { .. } => codes::syntax::INVALID_FACTOR,
            Self::TrailingInput { .. } => codes::syntax::TRAILING_INPUT,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
            Self::DerivationTooLong { .. } => codes::syntax::DERIVATION_TOO_LONG,
            Self::InvalidDerivation(_) => codes::syntax::INTERNAL_PARSER_ERROR,
        }
    }

    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::InvalidStatementStart { span, .. }
            | Self::InvalidFactor { span, .. }
            | Self::TrailingInput { span, .. }
            | Self::MaxRecursionDepth { span, .. } => Some(*span),
            Self::DerivationTooLong { .. } | Self::InvalidDerivation(_) => None,
        }
    }

    /// The lexeme the parser stopped at, if the error came from a token
    pub fn found(&self) -> Option<&str> {
        match self {
            Self::UnexpectedToken { found, .. }
            | Self::InvalidStatementStart { found, .. }
            | Self::InvalidFactor { found, .. }
            | Self::TrailingInput { found, .. } => Some(found),
            _ => None,
        }
    }

    /// Check if this error requires halting
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Get error severity
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Get recommended action
    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

/// `'int', ID, or 'print'`
pub fn expected_list(terminals: &[Terminal]) -> String {
    let names: Vec<&str> = terminals.iter().map(|t| t.expected_name()).collect();
    match names.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [a, b] => format!("{} or {}", a, b),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;
    use crate::utils::Position;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, Span::new(Position::new(4, 2, 3), Position::new(5, 2, 4)))
    }

    #[test]
    fn test_messages() {
        let x = token(TokenKind::Identifier, "x");
        assert_eq!(
            SyntaxError::unexpected_token("SEMICOLON", &x).to_string(),
            "Expected SEMICOLON. Got token 'x'"
        );

        let v = token(TokenKind::Number, "7");
        assert_eq!(
            SyntaxError::invalid_statement_start(&v).to_string(),
            "Expected 'int', ID, or 'print'. Got token '7'"
        );

        let semi = token(TokenKind::Semicolon, ";");
        assert_eq!(
            SyntaxError::invalid_factor(&semi).to_string(),
            "Expected ID, NUMBER, or '('. Got token ';'"
        );

        assert_eq!(
            SyntaxError::trailing_input(&v).to_string(),
            "Unexpected token '7'. Expected 'int', ID, or 'print'"
        );
    }

    #[test]
    fn test_error_code_mapping() {
        let x = token(TokenKind::Identifier, "x");

        assert_eq!(
            SyntaxError::unexpected_token("RPAREN", &x).error_code().as_str(),
            "E050"
        );
        assert_eq!(SyntaxError::trailing_input(&x).error_code().as_str(), "E043");
        assert_eq!(
            SyntaxError::max_recursion_depth(8, Span::dummy())
                .error_code()
                .as_str(),
            "E087"
        );
        assert_eq!(
            SyntaxError::derivation_too_long(10).error_code().as_str(),
            "E088"
        );
    }

    #[test]
    fn test_span_and_found() {
        let x = token(TokenKind::Identifier, "x");
        let error = SyntaxError::invalid_factor(&x);

        assert_eq!(error.span().map(|s| s.start.column), Some(3));
        assert_eq!(error.found(), Some("x"));
        assert_eq!(SyntaxError::derivation_too_long(1).span(), None);
        assert!(error.requires_halt());
    }

    #[test]
    fn test_expected_list() {
        assert_eq!(expected_list(&[]), "");
        assert_eq!(expected_list(&[Terminal::Semicolon]), "';'");
        assert_eq!(expected_list(&[Terminal::Plus, Terminal::Minus]), "'+' or '-'");
    }
}
