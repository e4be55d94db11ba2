//! file -> lexical -> syntax orchestration
//!
//! Each stage runs to completion before the next starts. The first error
//! ends the run.

mod error;
pub mod output;
mod result;

pub use error::PipelineError;
pub use output::{render_text, PipelineOutput};
pub use result::PipelineResult;

use crate::config::runtime::RuntimeConfig;
use crate::logging;
use std::path::Path;
use std::time::Instant;

/// Lex and parse source text with preferences from the environment
pub fn process_source(source: &str) -> Result<PipelineResult, PipelineError> {
    process_source_with_config(source, &RuntimeConfig::default())
}

pub fn process_source_with_config(
    source: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    // Stage 1: Lexical analysis
    let (tokens, lexical_metrics) =
        crate::lexical::tokenize_with_metrics(source, config.lexical.clone())?;
    let token_list = tokens.tokens().to_vec();

    // Stage 2: Syntax analysis
    let derivation =
        match crate::syntax::parse_program_with_preferences(tokens, config.syntax.clone()) {
            Ok(derivation) => derivation,
            Err(error) => return Err(PipelineError::syntax(error, token_list)),
        };

    let result = PipelineResult::new(
        token_list,
        derivation,
        lexical_metrics,
        start_time.elapsed(),
    );
    result.log_success();

    Ok(result)
}

/// Read a file and run it through the pipeline
pub fn process_file(file_path: impl AsRef<Path>) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::default())
}

pub fn process_file_with_config(
    file_path: impl AsRef<Path>,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let path = file_path.as_ref();

    logging::with_file_context(path.to_path_buf(), || -> Result<PipelineResult, PipelineError> {
        crate::log_info!("Starting minilang pipeline", "file" => path.display());

        let file_result =
            crate::file_processor::create_processor_from_preferences(&config.file_processor)
                .process_file(path)?;

        let result = process_source_with_config(&file_result.source, config)?;
        Ok(result.with_file_metadata(file_result.metadata))
    })
}
