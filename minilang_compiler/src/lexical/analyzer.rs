//! Core lexical analyzer
//!
//! Scanning is driven by an ordered rule table. At every position the rules
//! are tried top to bottom and the first match wins; if none matches the
//! character is rejected and lexing stops.

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::utils::{Position, SourceMap, Span};
use crate::{log_debug, log_error, log_success};
use serde::Serialize;

/// Lexical analysis errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Unexpected character '{character}' at line {line}, column {column}\n{snippet}")]
    InvalidCharacter {
        character: char,
        line: u32,
        column: u32,
        /// Offending source line and a caret under the character
        snippet: String,
    },

    #[error("Too many tokens: more than {limit} at line {line}, column {column}")]
    TooManyTokens { limit: usize, line: u32, column: u32 },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    /// Line and column where lexing stopped
    pub fn location(&self) -> (u32, u32) {
        match self {
            LexerError::InvalidCharacter { line, column, .. }
            | LexerError::TooManyTokens { line, column, .. } => (*line, *column),
        }
    }
}

// ============================================================================
// RULE TABLE
// ============================================================================

/// Returns the byte length of the match at the start of the input, if any
type Matcher = fn(&str) -> Option<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleAction {
    Emit(TokenKind),
    /// Kind depends on which operator character matched
    Symbol,
    Skip,
}

struct LexRule {
    name: &'static str,
    matcher: Matcher,
    action: RuleAction,
}

/// Priority order matters: keywords before identifiers.
const RULES: &[LexRule] = &[
    LexRule {
        name: "keyword-int",
        matcher: match_int_keyword,
        action: RuleAction::Emit(TokenKind::Int),
    },
    LexRule {
        name: "keyword-print",
        matcher: match_print_keyword,
        action: RuleAction::Emit(TokenKind::Print),
    },
    LexRule {
        name: "identifier",
        matcher: match_identifier,
        action: RuleAction::Emit(TokenKind::Identifier),
    },
    LexRule {
        name: "number",
        matcher: match_number,
        action: RuleAction::Emit(TokenKind::Number),
    },
    LexRule {
        name: "symbol",
        matcher: match_symbol,
        action: RuleAction::Symbol,
    },
    LexRule {
        name: "whitespace",
        matcher: match_whitespace,
        action: RuleAction::Skip,
    },
];

/// Exact literal not continued by a letter or digit
fn match_keyword(input: &str, keyword: &str) -> Option<usize> {
    let rest = input.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(ch) if ch.is_ascii_alphanumeric() => None,
        _ => Some(keyword.len()),
    }
}

fn match_int_keyword(input: &str) -> Option<usize> {
    match_keyword(input, "int")
}

fn match_print_keyword(input: &str) -> Option<usize> {
    match_keyword(input, "print")
}

/// `[A-Za-z][A-Za-z0-9]*`
fn match_identifier(input: &str) -> Option<usize> {
    let first = input.chars().next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    Some(
        input
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(input.len()),
    )
}

/// `[0-9]+`
fn match_number(input: &str) -> Option<usize> {
    let len = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    (len > 0).then_some(len)
}

fn match_symbol(input: &str) -> Option<usize> {
    let ch = input.chars().next()?;
    TokenKind::from_symbol(ch).map(|_| 1)
}

/// `[ \t\r\n]+`
fn match_whitespace(input: &str) -> Option<usize> {
    let len = input
        .find(|c: char| !matches!(c, ' ' | '\t' | '\r' | '\n'))
        .unwrap_or(input.len());
    (len > 0).then_some(len)
}

// ============================================================================
// METRICS
// ============================================================================

/// Per-class counts collected during one run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub number_tokens: usize,
    pub operator_tokens: usize,
    pub punctuation_tokens: usize,
    pub whitespace_runs: usize,
    pub max_identifier_length: usize,
    pub line_count: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;

        match token.kind {
            kind if kind.is_keyword() => self.keyword_tokens += 1,
            TokenKind::Identifier => {
                self.identifier_tokens += 1;
                self.max_identifier_length = self.max_identifier_length.max(token.lexeme.len());
            }
            TokenKind::Number => self.number_tokens += 1,
            kind if kind.is_operator() => self.operator_tokens += 1,
            kind if kind.is_punctuation() => self.punctuation_tokens += 1,
            _ => {}
        }
    }
}

// ============================================================================
// ANALYZER
// ============================================================================

pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
    max_tokens: usize,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
            max_tokens: MAX_TOKEN_COUNT,
        }
    }

    /// Lower the token limit for this analyzer; never above `MAX_TOKEN_COUNT`
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens.min(MAX_TOKEN_COUNT);
        self
    }

    /// Metrics of the most recent run
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Convert source text into a token stream terminated by `EndOfInput`
    pub fn tokenize(&mut self, source: &str) -> Result<TokenStream, LexerError> {
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting lexical analysis",
            "bytes" => source.len(),
            "max_tokens_allowed" => self.max_tokens
        );

        let mut tokens = Vec::new();
        let mut pos = Position::start();

        while pos.offset < source.len() {
            let rest = &source[pos.offset..];

            let Some((rule, len)) = RULES
                .iter()
                .find_map(|rule| (rule.matcher)(rest).map(|len| (rule, len)))
            else {
                return Err(self.invalid_character(source, rest, pos));
            };

            let lexeme = &rest[..len];
            let end = pos.advance_str(lexeme);
            let span = Span::new(pos, end);

            let kind = match rule.action {
                RuleAction::Skip => {
                    self.metrics.whitespace_runs += 1;
                    pos = end;
                    continue;
                }
                RuleAction::Emit(kind) => kind,
                RuleAction::Symbol => lexeme
                    .chars()
                    .next()
                    .and_then(TokenKind::from_symbol)
                    .ok_or_else(|| self.invalid_character(source, rest, pos))?,
            };

            if tokens.len() >= self.max_tokens {
                let error = LexerError::TooManyTokens {
                    limit: self.max_tokens,
                    line: pos.line,
                    column: pos.column,
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    span = span,
                    "limit" => self.max_tokens
                );
                return Err(error);
            }

            let token = Token::new(kind, lexeme, span);
            if self.preferences.trace_tokens {
                log_debug!("Token matched",
                    "rule" => rule.name,
                    "token" => &token,
                    "at" => pos
                );
            }
            if self.preferences.collect_detailed_metrics {
                self.metrics.record_token(&token);
            } else {
                self.metrics.total_tokens += 1;
            }

            tokens.push(token);
            pos = end;
        }

        tokens.push(Token::end_of_input(Span::point(pos)));
        self.metrics.line_count = pos.line as usize;

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
            "tokens" => self.metrics.total_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "numbers" => self.metrics.number_tokens,
            "operators" => self.metrics.operator_tokens,
            "lines" => self.metrics.line_count
        );

        Ok(TokenStream::from_terminated(tokens))
    }

    fn invalid_character(&self, source: &str, rest: &str, pos: Position) -> LexerError {
        let character = rest.chars().next().unwrap_or('\0');
        let snippet = SourceMap::new(source).caret_snippet(pos);
        let error = LexerError::InvalidCharacter {
            character,
            line: pos.line,
            column: pos.column,
            snippet,
        };

        log_error!(error.error_code(), "Unexpected character",
            span = Span::point(pos),
            "character" => character.escape_debug()
        );

        error
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
