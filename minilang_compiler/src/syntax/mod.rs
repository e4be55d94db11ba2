//! Syntax analysis module - TokenStream to leftmost derivation
//!
//! The parser validates a token stream against the minilang grammar and
//! records every sentential form it passes through. Nothing is returned on
//! failure except the first error.

mod error;
mod parser;

pub use error::{expected_list, SyntaxError, SyntaxResult, FACTOR_START, STATEMENT_START};
pub use parser::MinilangParser;

use crate::config::runtime::SyntaxPreferences;
use crate::derivation::DerivationLog;
use crate::tokens::TokenStream;
use crate::{log_debug, log_error};

/// Parse a token stream with preferences from the environment
pub fn parse_program(token_stream: TokenStream) -> SyntaxResult<DerivationLog> {
    parse_program_with_preferences(token_stream, SyntaxPreferences::default())
}

pub fn parse_program_with_preferences(
    token_stream: TokenStream,
    preferences: SyntaxPreferences,
) -> SyntaxResult<DerivationLog> {
    log_debug!("Starting syntax analysis", "tokens" => token_stream.len());

    let result = MinilangParser::with_preferences(token_stream, preferences).parse();

    if let Err(error) = &result {
        match error.span() {
            Some(span) => {
                log_error!(error.error_code(), "Syntax analysis failed", span = span,
                    "error" => error
                );
            }
            None => {
                log_error!(error.error_code(), "Syntax analysis failed",
                    "error" => error
                );
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    #[test]
    fn test_reference_program() {
        let source = "int x ; x = 1 + 2 * 3 ; print ( x ) ;";
        let tokens = tokenize(source).unwrap();

        assert_eq!(
            tokens.kinds(),
            vec![
                TokenKind::Int,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::Mult,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Print,
                TokenKind::LParen,
                TokenKind::Identifier,
                TokenKind::RParen,
                TokenKind::Semicolon,
                TokenKind::EndOfInput,
            ]
        );

        let log = parse_program(tokens).unwrap();
        assert_eq!(log.first(), Some("Program"));
        assert_eq!(
            log.last(),
            Some("int id ; id = num + num * num ; print ( id ) ;")
        );
    }

    #[test]
    fn test_empty_program() {
        let log = parse_program(tokenize("  \n\t").unwrap()).unwrap();
        assert_eq!(log.numbered_lines(), vec!["1. Program", "2. StatementList", "3. "]);
    }

    #[test]
    fn test_failure_returns_first_error_only() {
        let tokens = tokenize("int ; print(;").unwrap();
        assert_matches!(
            parse_program(tokens),
            Err(SyntaxError::UnexpectedToken { ref expected, .. }) if expected == "ID"
        );
    }
}
