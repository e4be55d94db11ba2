// Internal modules
pub mod config;
pub mod derivation;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use derivation::{DerivationLog, DerivationRecorder};
pub use lexical::{tokenize, LexerError};
pub use pipeline::{process_file, process_source, PipelineError, PipelineResult};
pub use syntax::{parse_program, SyntaxError};
pub use tokens::{Token, TokenKind, TokenStream};

pub use pipeline::output::PipelineOutput;
