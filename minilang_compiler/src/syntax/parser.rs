//! LL(1) recursive-descent parser for minilang
//!
//! One method per nonterminal. Each method reports its chosen production to
//! the recorder before it consumes a token or descends, so the recorded
//! forms follow leftmost-derivation order. The right-recursive rules
//! (`StatementList`, `ExprPrime`, `TermPrime`) are driven by loops; their
//! recursive call is always in tail position, so the recorded steps are the
//! same as with literal recursion.

use crate::config::compile_time::syntax::{MAX_DERIVATION_STEPS, MAX_PARSE_DEPTH};
use crate::config::runtime::SyntaxPreferences;
use crate::derivation::{DerivationError, DerivationLog, DerivationRecorder};
use crate::grammar::productions::*;
use crate::grammar::{first_set, Nonterminal, Production, Terminal};
use crate::logging::codes;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{TokenKind, TokenStream};
use crate::{log_debug, log_error, log_success};

pub struct MinilangParser {
    tokens: TokenStream,
    recorder: DerivationRecorder,
    preferences: SyntaxPreferences,
    depth: usize,
    max_depth: usize,
    max_steps: usize,
}

impl MinilangParser {
    pub fn new(tokens: TokenStream) -> Self {
        Self::with_preferences(tokens, SyntaxPreferences::default())
    }

    pub fn with_preferences(tokens: TokenStream, preferences: SyntaxPreferences) -> Self {
        log_debug!("Creating minilang parser", "tokens" => tokens.len());

        Self {
            tokens,
            recorder: DerivationRecorder::new().with_trace(preferences.trace_productions),
            preferences,
            depth: 0,
            max_depth: MAX_PARSE_DEPTH,
            max_steps: MAX_DERIVATION_STEPS,
        }
    }

    /// Override the nesting and derivation limits for this run
    pub fn with_limits(mut self, max_depth: usize, max_steps: usize) -> Self {
        self.max_depth = max_depth;
        self.max_steps = max_steps;
        self
    }

    /// Lower the byte budget of the derivation log for this run
    pub fn with_max_log_bytes(mut self, max_log_bytes: usize) -> Self {
        self.recorder = self.recorder.with_max_log_bytes(max_log_bytes);
        self
    }

    /// Parse the whole stream and return the derivation log
    pub fn parse(self) -> SyntaxResult<DerivationLog> {
        self.parse_recorded().map(DerivationRecorder::into_log)
    }

    /// Parse the whole stream and return the recorder, steps included
    pub fn parse_recorded(mut self) -> SyntaxResult<DerivationRecorder> {
        self.program()?;

        if !self.tokens.is_at_end() {
            return Err(SyntaxError::trailing_input(self.tokens.current()));
        }

        if self.preferences.verify_leftmost {
            if let Err(error) = self.recorder.verify_leftmost() {
                log_error!(error.error_code(), "Recorded derivation is not leftmost",
                    "error" => &error
                );
                return Err(error.into());
            }
        }

        log_success!(codes::success::PARSE_COMPLETE, "Program parsed",
            "tokens" => self.tokens.len(),
            "forms" => self.recorder.log().len()
        );

        Ok(self.recorder)
    }

    // ------------------------------------------------------------------
    // Nonterminals
    // ------------------------------------------------------------------

    fn program(&mut self) -> SyntaxResult<()> {
        self.record(&PROGRAM)?;
        self.statement_list()
    }

    fn statement_list(&mut self) -> SyntaxResult<()> {
        while self.lookahead_starts(Nonterminal::Statement) {
            self.record(&STATEMENT_LIST)?;
            self.statement()?;
        }
        self.record(&STATEMENT_LIST_EMPTY)
    }

    fn statement(&mut self) -> SyntaxResult<()> {
        match self.tokens.current_kind() {
            TokenKind::Int => {
                self.record(&STATEMENT_DECLARATION)?;
                self.declaration()
            }
            TokenKind::Identifier => {
                self.record(&STATEMENT_ASSIGNMENT)?;
                self.assignment()
            }
            TokenKind::Print => {
                self.record(&STATEMENT_PRINT)?;
                self.print_stmt()
            }
            _ => Err(SyntaxError::invalid_statement_start(self.tokens.current())),
        }
    }

    fn declaration(&mut self) -> SyntaxResult<()> {
        self.record(&DECLARATION)?;
        self.eat(TokenKind::Int)?;
        self.eat(TokenKind::Identifier)?;
        self.eat(TokenKind::Semicolon)
    }

    fn assignment(&mut self) -> SyntaxResult<()> {
        self.record(&ASSIGNMENT)?;
        self.eat(TokenKind::Identifier)?;
        self.eat(TokenKind::Assign)?;
        self.expr()?;
        self.eat(TokenKind::Semicolon)
    }

    fn print_stmt(&mut self) -> SyntaxResult<()> {
        self.record(&PRINT_STMT)?;
        self.eat(TokenKind::Print)?;
        self.eat(TokenKind::LParen)?;
        self.expr()?;
        self.eat(TokenKind::RParen)?;
        self.eat(TokenKind::Semicolon)
    }

    fn expr(&mut self) -> SyntaxResult<()> {
        self.enter()?;
        self.record(&EXPR)?;
        self.term()?;
        self.expr_prime()?;
        self.depth -= 1;
        Ok(())
    }

    fn expr_prime(&mut self) -> SyntaxResult<()> {
        loop {
            let operator = self.tokens.current_kind();
            let production = match operator {
                TokenKind::Plus => EXPR_PRIME_PLUS,
                TokenKind::Minus => EXPR_PRIME_MINUS,
                _ => return self.record(&EXPR_PRIME_EMPTY),
            };
            self.record(&production)?;
            self.eat(operator)?;
            self.term()?;
        }
    }

    fn term(&mut self) -> SyntaxResult<()> {
        self.record(&TERM)?;
        self.factor()?;
        self.term_prime()
    }

    fn term_prime(&mut self) -> SyntaxResult<()> {
        loop {
            let operator = self.tokens.current_kind();
            let production = match operator {
                TokenKind::Mult => TERM_PRIME_MULT,
                TokenKind::Div => TERM_PRIME_DIV,
                _ => return self.record(&TERM_PRIME_EMPTY),
            };
            self.record(&production)?;
            self.eat(operator)?;
            self.factor()?;
        }
    }

    fn factor(&mut self) -> SyntaxResult<()> {
        match self.tokens.current_kind() {
            TokenKind::Identifier => {
                self.record(&FACTOR_ID)?;
                self.eat(TokenKind::Identifier)
            }
            TokenKind::Number => {
                self.record(&FACTOR_NUM)?;
                self.eat(TokenKind::Number)
            }
            TokenKind::LParen => {
                self.record(&FACTOR_PAREN)?;
                self.eat(TokenKind::LParen)?;
                self.expr()?;
                self.eat(TokenKind::RParen)
            }
            _ => Err(SyntaxError::invalid_factor(self.tokens.current())),
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Consume the lookahead if it has the expected kind
    fn eat(&mut self, expected: TokenKind) -> SyntaxResult<()> {
        if self.tokens.current_kind() != expected {
            return Err(SyntaxError::unexpected_token(
                expected.display_name(),
                self.tokens.current(),
            ));
        }
        self.tokens.advance();
        Ok(())
    }

    fn record(&mut self, production: &Production) -> SyntaxResult<()> {
        if self.recorder.step_count() >= self.max_steps {
            return Err(SyntaxError::derivation_too_long(self.max_steps));
        }
        match self.recorder.apply(production) {
            Ok(_) => Ok(()),
            Err(DerivationError::LogTooLarge { limit, .. }) => {
                Err(SyntaxError::derivation_log_too_large(limit))
            }
            Err(error) => Err(error.into()),
        }
    }

    fn enter(&mut self) -> SyntaxResult<()> {
        if self.depth >= self.max_depth {
            log_debug!("Nesting limit reached",
                "depth" => self.depth,
                "max_depth" => self.max_depth
            );
            return Err(SyntaxError::max_recursion_depth(
                self.max_depth,
                self.tokens.current().span,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn lookahead_starts(&self, nonterminal: Nonterminal) -> bool {
        Terminal::from_kind(self.tokens.current_kind())
            .is_some_and(|terminal| first_set(nonterminal).contains(&terminal))
    }
}
