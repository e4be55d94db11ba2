//! Text and JSON rendering of a pipeline run

use super::{PipelineError, PipelineResult};
use crate::derivation::DerivationLog;
use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::tokens::Token;
use serde::Serialize;
use std::fmt::Write;

const RULE_WIDTH: usize = 50;

/// `(KIND , lexeme)` chunks separated by single spaces
pub fn render_token_stream(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One numbered form per line, starting at 1
pub fn render_derivation(log: &DerivationLog) -> String {
    log.numbered_lines().join("\n")
}

/// Terminal output for a run, as printed by the CLI
pub fn render_text(outcome: &Result<PipelineResult, PipelineError>) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    if let Err(PipelineError::FileProcessing(error)) = outcome {
        let _ = writeln!(out, "Error: {}", error);
        return out;
    }

    let _ = writeln!(out, "Token stream:");
    let _ = writeln!(out, "{}", rule);

    let tokens = match outcome {
        Ok(result) => &result.tokens[..],
        Err(error) => match error.tokens() {
            Some(tokens) => tokens,
            None => {
                let _ = writeln!(out, "Lexical error: {}", error.detail());
                return out;
            }
        },
    };

    let _ = writeln!(out, "{}", render_token_stream(tokens));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule);

    match outcome {
        Ok(result) => {
            let _ = writeln!(out);
            let _ = writeln!(out, "Program parsed successfully.");
            let _ = writeln!(out);
            let _ = writeln!(out, "Leftmost derivation:");
            let _ = writeln!(out, "{}", render_derivation(&result.derivation));
        }
        Err(error) => {
            let _ = writeln!(out, "Syntax error: {}", error.detail());
        }
    }

    out
}

#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub phase: &'static str,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl From<&PipelineError> for ErrorOutput {
    fn from(error: &PipelineError) -> Self {
        let location = error.location();
        Self {
            phase: error.phase(),
            code: error.error_code().as_str(),
            message: error.detail(),
            line: location.map(|(line, _)| line),
            column: location.map(|(_, column)| column),
        }
    }
}

/// Machine-readable view of a run
#[derive(Debug, Serialize)]
pub struct PipelineOutput<'a> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<&'a FileMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<&'a [Token]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexical_metrics: Option<&'a LexicalMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivation: Option<&'a DerivationLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
}

impl<'a> PipelineOutput<'a> {
    pub fn new(outcome: &'a Result<PipelineResult, PipelineError>) -> Self {
        match outcome {
            Ok(result) => Self {
                success: true,
                file: result.file_metadata.as_ref(),
                tokens: Some(&result.tokens),
                lexical_metrics: Some(&result.lexical_metrics),
                derivation: Some(&result.derivation),
                error: None,
            },
            Err(error) => Self {
                success: false,
                file: None,
                tokens: error.tokens(),
                lexical_metrics: None,
                derivation: None,
                error: Some(ErrorOutput::from(error)),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::process_source;

    #[test]
    fn test_success_layout() {
        let outcome = process_source("int x;");
        let text = render_text(&outcome);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Token stream:");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], "(INT , int) (ID , x) (SEMICOLON , ;) (EOF , )");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "=".repeat(50));
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "Program parsed successfully.");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "Leftmost derivation:");
        assert_eq!(lines[9], "1. Program");
        assert_eq!(lines.last(), Some(&"6. int id ;"));
    }

    #[test]
    fn test_syntax_error_still_shows_tokens() {
        let outcome = process_source("int x x");
        let text = render_text(&outcome);

        assert!(text.contains("(INT , int) (ID , x) (ID , x) (EOF , )"));
        assert!(text.ends_with("Syntax error: Expected SEMICOLON. Got token 'x'\n"));
        assert!(!text.contains("Leftmost derivation:"));
    }

    #[test]
    fn test_lexical_error_layout() {
        let outcome = process_source("x = 1 @ 2;");
        let text = render_text(&outcome);

        assert_eq!(
            text,
            format!(
                "Token stream:\n{}\nLexical error: Unexpected character '@' at line 1, column 7\nx = 1 @ 2;\n      ^\n",
                "=".repeat(50)
            )
        );
    }

    #[test]
    fn test_json_output() {
        let outcome = process_source("print(2);");
        let json = PipelineOutput::new(&outcome).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["tokens"].as_array().unwrap().len(), 6);
        assert_eq!(value["derivation"][0], "Program");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_json_error_output() {
        let outcome = process_source("x = 1 @ 2;");
        let json = PipelineOutput::new(&outcome).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["phase"], "lexical");
        assert_eq!(value["error"]["code"], "E020");
        assert_eq!(value["error"]["line"], 1);
        assert_eq!(value["error"]["column"], 7);
        assert!(value.get("tokens").is_none());
    }
}
