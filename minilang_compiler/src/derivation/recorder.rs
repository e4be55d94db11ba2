//! Sentential form bookkeeping for the parser
//!
//! The recorder starts from `[Program]` and rewrites one nonterminal per
//! applied production. Every resulting form is rendered into the log, so the
//! log always holds one more entry than there are steps.
//!
//! Each entry is a full copy of the form, so the log grows with the square
//! of the program length. The total rendered bytes are capped by
//! `MAX_DERIVATION_BYTES`.

use crate::config::compile_time::syntax::MAX_DERIVATION_BYTES;
use crate::grammar::{render_form, Nonterminal, Production, Symbol};
use crate::logging::{codes, Code};
use crate::{log_debug, log_success, log_warning};
use serde::Serialize;
use thiserror::Error;

/// One production application and where in the form it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivationStep {
    pub production: Production,
    /// Index of the rewritten nonterminal in the form before the step
    pub index: usize,
}

/// Rendered sentential forms, in derivation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DerivationLog {
    forms: Vec<String>,
}

impl DerivationLog {
    pub fn entries(&self) -> &[String] {
        &self.forms
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.forms.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.forms.last().map(String::as_str)
    }

    /// `1. Program`, `2. StatementList`, ...
    pub fn numbered_lines(&self) -> Vec<String> {
        self.forms
            .iter()
            .enumerate()
            .map(|(i, form)| format!("{}. {}", i + 1, form))
            .collect()
    }

    fn push(&mut self, form: String) {
        self.forms.push(form);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("Step {step} rewrote {found} at index {index}, but the leftmost nonterminal is at {leftmost:?}")]
    NotLeftmost {
        step: usize,
        found: Nonterminal,
        index: usize,
        leftmost: Option<usize>,
    },

    #[error("Step {step} produced '{actual}' but the log records '{recorded}'")]
    FormMismatch {
        step: usize,
        recorded: String,
        actual: String,
    },

    #[error("Log holds {forms} forms for {steps} steps")]
    LengthMismatch { forms: usize, steps: usize },

    #[error("Step {step} would grow the derivation log past {limit} bytes")]
    LogTooLarge { limit: usize, step: usize },
}

impl DerivationError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::LogTooLarge { .. } => codes::syntax::DERIVATION_TOO_LONG,
            _ => codes::derivation::NOT_LEFTMOST,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DerivationRecorder {
    form: Vec<Symbol>,
    log: DerivationLog,
    steps: Vec<DerivationStep>,
    trace: bool,
    log_bytes: usize,
    max_log_bytes: usize,
}

impl Default for DerivationRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl DerivationRecorder {
    pub fn new() -> Self {
        let form = vec![Symbol::Nonterminal(Nonterminal::Program)];
        let start = render_form(&form);
        let log_bytes = start.len();
        let mut log = DerivationLog::default();
        log.push(start);

        Self {
            form,
            log,
            steps: Vec::new(),
            trace: false,
            log_bytes,
            max_log_bytes: MAX_DERIVATION_BYTES,
        }
    }

    /// Lower the byte budget for the rendered log; never above `MAX_DERIVATION_BYTES`
    pub fn with_max_log_bytes(mut self, max_log_bytes: usize) -> Self {
        self.max_log_bytes = max_log_bytes.min(MAX_DERIVATION_BYTES);
        self
    }

    /// Log every application at debug level
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn apply(&mut self, production: &Production) -> Result<Option<usize>, DerivationError> {
        self.apply_production(production.lhs, production.rhs)
    }

    /// Rewrite the first occurrence of `nonterminal` with `rhs`
    ///
    /// An empty `rhs` removes the nonterminal. Returns the index rewritten,
    /// or `None` when the nonterminal is absent; the form and log are then
    /// left untouched. Fails with `LogTooLarge`, again leaving both
    /// untouched, when the new form would exceed the byte budget.
    pub fn apply_production(
        &mut self,
        nonterminal: Nonterminal,
        rhs: &'static [Symbol],
    ) -> Result<Option<usize>, DerivationError> {
        let target = Symbol::Nonterminal(nonterminal);
        let Some(index) = self.form.iter().position(|s| *s == target) else {
            log_warning!(code = codes::derivation::NONTERMINAL_NOT_IN_FORM,
                "Production applied to a nonterminal absent from the form",
                "nonterminal" => nonterminal,
                "form" => render_form(&self.form)
            );
            return Ok(None);
        };

        let mut next = Vec::with_capacity(self.form.len() + rhs.len());
        next.extend_from_slice(&self.form[..index]);
        next.extend_from_slice(rhs);
        next.extend_from_slice(&self.form[index + 1..]);

        let rendered = render_form(&next);
        if self.log_bytes + rendered.len() > self.max_log_bytes {
            return Err(DerivationError::LogTooLarge {
                limit: self.max_log_bytes,
                step: self.steps.len() + 1,
            });
        }

        self.form = next;
        self.steps.push(DerivationStep {
            production: Production::new(nonterminal, rhs),
            index,
        });
        self.log_bytes += rendered.len();
        self.log.push(rendered);

        if self.trace {
            log_debug!("Applied production",
                "step" => self.steps.len(),
                "production" => Production::new(nonterminal, rhs),
                "index" => index
            );
        }

        Ok(Some(index))
    }

    pub fn form(&self) -> &[Symbol] {
        &self.form
    }

    pub fn log(&self) -> &DerivationLog {
        &self.log
    }

    pub fn steps(&self) -> &[DerivationStep] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Rendered bytes held by the log
    pub fn log_bytes(&self) -> usize {
        self.log_bytes
    }

    /// True once no nonterminal remains in the form
    pub fn is_complete(&self) -> bool {
        !self.form.iter().any(|s| s.is_nonterminal())
    }

    pub fn into_log(self) -> DerivationLog {
        self.log
    }

    /// Replay the recorded steps from `[Program]` and check each one
    /// rewrote the leftmost nonterminal and reproduced its logged form.
    pub fn verify_leftmost(&self) -> Result<(), DerivationError> {
        if self.log.len() != self.steps.len() + 1 {
            return Err(DerivationError::LengthMismatch {
                forms: self.log.len(),
                steps: self.steps.len(),
            });
        }

        let mut form = vec![Symbol::Nonterminal(Nonterminal::Program)];

        for (i, step) in self.steps.iter().enumerate() {
            let step_number = i + 1;
            let leftmost = form.iter().position(|s| s.is_nonterminal());
            let expected = Symbol::Nonterminal(step.production.lhs);

            if leftmost != Some(step.index) || form.get(step.index) != Some(&expected) {
                return Err(DerivationError::NotLeftmost {
                    step: step_number,
                    found: step.production.lhs,
                    index: step.index,
                    leftmost,
                });
            }

            form.splice(step.index..=step.index, step.production.rhs.iter().copied());

            let actual = render_form(&form);
            let recorded = &self.log.entries()[step_number];
            if &actual != recorded {
                return Err(DerivationError::FormMismatch {
                    step: step_number,
                    recorded: recorded.clone(),
                    actual,
                });
            }
        }

        log_success!(codes::success::DERIVATION_VERIFIED, "Derivation verified as leftmost",
            "steps" => self.steps.len()
        );

        Ok(())
    }
}
