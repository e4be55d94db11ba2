use crate::derivation::DerivationLog;
use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::tokens::Token;
use std::time::Duration;

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Token stream, `EndOfInput` included
    pub tokens: Vec<Token>,
    pub derivation: DerivationLog,
    pub lexical_metrics: LexicalMetrics,
    /// Present when the source came from a file
    pub file_metadata: Option<FileMetadata>,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        tokens: Vec<Token>,
        derivation: DerivationLog,
        lexical_metrics: LexicalMetrics,
        processing_duration: Duration,
    ) -> Self {
        Self {
            tokens,
            derivation,
            lexical_metrics,
            file_metadata: None,
            processing_duration,
        }
    }

    pub fn with_file_metadata(mut self, metadata: FileMetadata) -> Self {
        self.file_metadata = Some(metadata);
        self
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn log_success(&self) {
        crate::log_performance!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "Pipeline completed",
            duration = self.processing_duration,
            "tokens" => self.token_count(),
            "derivation_forms" => self.derivation.len()
        );
    }
}
