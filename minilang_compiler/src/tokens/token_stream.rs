//! Validated token sequence with a forward-only cursor
//!
//! Construction guarantees exactly one `EndOfInput`, in last position. The
//! cursor never moves past it, so `current()` is always defined.

use crate::logging::codes::{self, Code};
use crate::tokens::token::{Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenStreamError {
    #[error("Token stream is empty")]
    Empty,

    #[error("Token stream does not end with EOF (last token is {last})")]
    MissingEndOfInput { last: TokenKind },

    #[error("EOF token at index {index} is not the last of {len} tokens")]
    EndOfInputNotLast { index: usize, len: usize },
}

impl TokenStreamError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Empty => codes::syntax::EMPTY_TOKEN_STREAM,
            Self::MissingEndOfInput { .. } | Self::EndOfInputNotLast { .. } => {
                codes::syntax::MISSING_EOF
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Result<Self, TokenStreamError> {
        Self::validate(&tokens)?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Wrap tokens the lexer has already terminated
    pub(crate) fn from_terminated(tokens: Vec<Token>) -> Self {
        debug_assert!(Self::validate(&tokens).is_ok());
        Self {
            tokens,
            position: 0,
        }
    }

    fn validate(tokens: &[Token]) -> Result<(), TokenStreamError> {
        let last = tokens.last().ok_or(TokenStreamError::Empty)?;
        if !last.is_end_of_input() {
            return Err(TokenStreamError::MissingEndOfInput { last: last.kind });
        }

        if let Some(index) = tokens[..tokens.len() - 1]
            .iter()
            .position(Token::is_end_of_input)
        {
            return Err(TokenStreamError::EndOfInputNotLast {
                index,
                len: tokens.len(),
            });
        }

        Ok(())
    }

    /// Token under the cursor (the lookahead)
    pub fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Consume the current token and return it. Stays on `EndOfInput`.
    pub fn advance(&mut self) -> &Token {
        let consumed = self.position;
        if !self.tokens[consumed].is_end_of_input() {
            self.position += 1;
        }
        &self.tokens[consumed]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.current().is_end_of_input()
    }

    /// Number of tokens including the terminating `EndOfInput`
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false: a valid stream holds at least `EndOfInput`
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }

    /// Space-separated `(KIND , lexeme)` listing of every token
    pub fn render(&self) -> String {
        self.tokens
            .iter()
            .map(Token::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Span;
    use assert_matches::assert_matches;

    fn tok(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, Span::dummy())
    }

    fn eof() -> Token {
        Token::end_of_input(Span::dummy())
    }

    #[test]
    fn test_rejects_empty() {
        assert_matches!(TokenStream::new(vec![]), Err(TokenStreamError::Empty));
    }

    #[test]
    fn test_rejects_missing_terminator() {
        let result = TokenStream::new(vec![tok(TokenKind::Identifier, "x")]);
        assert_matches!(
            result,
            Err(TokenStreamError::MissingEndOfInput {
                last: TokenKind::Identifier
            })
        );
    }

    #[test]
    fn test_rejects_early_terminator() {
        let result = TokenStream::new(vec![eof(), tok(TokenKind::Semicolon, ";"), eof()]);
        assert_matches!(
            result,
            Err(TokenStreamError::EndOfInputNotLast { index: 0, len: 3 })
        );
    }

    #[test]
    fn test_cursor_stops_at_end() {
        let mut stream =
            TokenStream::new(vec![tok(TokenKind::Number, "7"), eof()]).unwrap();

        assert_eq!(stream.current_kind(), TokenKind::Number);

        let consumed = stream.advance().clone();
        assert_eq!(consumed.lexeme, "7");
        assert!(stream.is_at_end());

        stream.advance();
        stream.advance();
        assert_eq!(stream.position(), 1);
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_render_listing() {
        let stream = TokenStream::new(vec![
            tok(TokenKind::Int, "int"),
            tok(TokenKind::Identifier, "x"),
            tok(TokenKind::Semicolon, ";"),
            eof(),
        ])
        .unwrap();

        assert_eq!(
            stream.render(),
            "(INT , int) (ID , x) (SEMICOLON , ;) (EOF , )"
        );
        assert_eq!(stream.len(), 4);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TokenStreamError::Empty.error_code().as_str(), "E041");
        assert_eq!(
            TokenStreamError::EndOfInputNotLast { index: 0, len: 2 }
                .error_code()
                .as_str(),
            "E040"
        );
    }
}
