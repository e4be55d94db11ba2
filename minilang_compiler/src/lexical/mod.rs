//! Lexical analysis module
//!
//! Turns minilang source text into a [`TokenStream`]. Fail-fast: the first
//! character no rule accepts aborts the run and no partial stream is returned.

pub mod analyzer;

use crate::config::runtime::LexicalPreferences;
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};

/// Tokenize source text with default preferences
pub fn tokenize(source: &str) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize(source)
}

/// Tokenize and hand back the run's metrics alongside the stream
pub fn tokenize_with_metrics(
    source: &str,
    preferences: LexicalPreferences,
) -> Result<(TokenStream, LexicalMetrics), LexerError> {
    let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
    let stream = analyzer.tokenize(source)?;
    Ok((stream, analyzer.metrics().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;

    #[test]
    fn test_tokenize_appends_single_terminator() {
        let stream = tokenize("int x;").unwrap();
        let eof_count = stream
            .tokens()
            .iter()
            .filter(|t| t.kind == TokenKind::EndOfInput)
            .count();
        assert_eq!(eof_count, 1);
        assert!(stream.tokens().last().unwrap().lexeme.is_empty());
    }

    #[test]
    fn test_lexemes_reproduce_source_without_whitespace() {
        let source = "x = (1+ 22) *y3 ;";
        let stream = tokenize(source).unwrap();
        let joined: String = stream.tokens().iter().map(|t| t.lexeme.as_str()).collect();
        let stripped: String = source.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(joined, stripped);
    }

    #[test]
    fn test_tokenize_with_metrics() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            trace_tokens: false,
        };
        let (stream, metrics) = tokenize_with_metrics("print(1);", preferences).unwrap();
        assert_eq!(stream.len(), 6);
        assert_eq!(metrics.total_tokens, 5);
        assert_eq!(metrics.keyword_tokens, 1);
    }
}
