use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::Code;
use crate::syntax::SyntaxError;
use crate::tokens::Token;

/// Pipeline processing errors
///
/// A syntax failure keeps the token list: lexing succeeded, and the
/// stream is still shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Syntax analysis failed: {error}")]
    SyntaxAnalysis {
        #[source]
        error: SyntaxError,
        tokens: Vec<Token>,
    },
}

impl PipelineError {
    pub fn syntax(error: SyntaxError, tokens: Vec<Token>) -> Self {
        Self::SyntaxAnalysis { error, tokens }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(e) => e.error_code(),
            Self::LexicalAnalysis(e) => e.error_code(),
            Self::SyntaxAnalysis { error, .. } => error.error_code(),
        }
    }

    /// Short name of the failing phase
    pub fn phase(&self) -> &'static str {
        match self {
            Self::FileProcessing(_) => "file",
            Self::LexicalAnalysis(_) => "lexical",
            Self::SyntaxAnalysis { .. } => "syntax",
        }
    }

    /// Tokens produced before the failure, if lexing finished
    pub fn tokens(&self) -> Option<&[Token]> {
        match self {
            Self::SyntaxAnalysis { tokens, .. } => Some(tokens),
            _ => None,
        }
    }

    /// The phase error's own message, without the pipeline prefix
    pub fn detail(&self) -> String {
        match self {
            Self::FileProcessing(e) => e.to_string(),
            Self::LexicalAnalysis(e) => e.to_string(),
            Self::SyntaxAnalysis { error, .. } => error.to_string(),
        }
    }

    /// 1-based line and column the error points at, when known
    pub fn location(&self) -> Option<(u32, u32)> {
        match self {
            Self::FileProcessing(_) => None,
            Self::LexicalAnalysis(e) => Some(e.location()),
            Self::SyntaxAnalysis { error, .. } => error
                .span()
                .map(|span| (span.start.line, span.start.column)),
        }
    }
}
