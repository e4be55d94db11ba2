//! Whole-file source reader with a compile-time size limit

use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_performance, log_success};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Extensions accepted when `require_known_extension` is set
pub const KNOWN_EXTENSIONS: &[&str] = &["txt", "ml", "minilang"];

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected one of .txt, .ml, .minilang, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            Self::InvalidExtension { .. } => codes::file_processing::INVALID_EXTENSION,
            Self::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            Self::PermissionDenied { .. } => codes::file_processing::PERMISSION_DENIED,
            Self::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            Self::IoError { .. } => codes::file_processing::IO_ERROR,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    fn from_io(error: &io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::InvalidData => Self::InvalidEncoding { path },
            _ => Self::IoError {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub size: u64,
    pub extension: Option<String>,
    pub line_count: usize,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    pub fn has_known_extension(&self) -> bool {
        self.extension
            .as_deref()
            .is_some_and(|ext| KNOWN_EXTENSIONS.contains(&ext))
    }
}

/// Source text and what was learned while reading it
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Whitespace-only files are valid, empty programs
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub require_known_extension: bool,
    pub enable_performance_logging: bool,
    max_file_size: u64,
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_known_extension: false,
            enable_performance_logging: true,
            max_file_size: MAX_FILE_SIZE,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_known_extension: prefs.require_known_extension,
            enable_performance_logging: prefs.enable_performance_logging,
            max_file_size: MAX_FILE_SIZE,
        }
    }

    pub fn with_known_extension_required(mut self, required: bool) -> Self {
        self.require_known_extension = required;
        self
    }

    /// Lower the size limit for this processor; it never exceeds the compiled limit
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size.min(MAX_FILE_SIZE);
        self
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Read a whole source file after checking its size and extension
    pub fn process_file(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let path = file_path.as_ref();
        let start_time = Instant::now();
        let path_str = path.display().to_string();

        log_debug!("Starting file processing", "file" => &path_str);

        let mut metadata = self.get_metadata(path)?;
        self.validate_file(&metadata)?;

        let source = fs::read_to_string(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path);
            log_error!(error.error_code(), "Failed to read file",
                "file" => &path_str,
                "io_error" => e
            );
            error
        })?;

        metadata.line_count = source.lines().count();

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        if self.enable_performance_logging {
            log_performance!(codes::success::FILE_PROCESSING_SUCCESS, "File processed successfully",
                duration = result.processing_duration,
                "file" => &path_str,
                "size" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count()
            );
        } else {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS, "File processed successfully",
                "file" => &path_str
            );
        }

        Ok(result)
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path);
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e
            );
            error
        })?;

        if !metadata.is_file() {
            let error = FileProcessorError::IoError {
                message: format!("{} is not a regular file", path.display()),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => path.display());
            return Err(error);
        }

        Ok(FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension: path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_lowercase),
            line_count: 0,
        })
    }

    fn validate_file(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > self.max_file_size {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: self.max_file_size,
            };
            log_error!(error.error_code(), "File exceeds maximum size limit",
                "file" => metadata.path.display(),
                "size_bytes" => metadata.size,
                "limit_bytes" => self.max_file_size
            );
            return Err(error);
        }

        if self.require_known_extension && !metadata.has_known_extension() {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have a known source extension",
                "file" => metadata.path.display(),
                "extension" => metadata.extension.as_deref().unwrap_or("none")
            );
            return Err(error);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_reads_source_and_metadata() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("program.txt");
        fs::write(&file_path, "int x;\nx = 1;\n").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert_eq!(result.source, "int x;\nx = 1;\n");
        assert_eq!(result.metadata.size, 14);
        assert_eq!(result.metadata.line_count, 2);
        assert_eq!(result.metadata.extension.as_deref(), Some("txt"));
        assert!(!result.is_effectively_empty());
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.txt");
        fs::write(&file_path, "").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert!(result.is_effectively_empty());
        assert_eq!(result.metadata.line_count, 0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path().join("nope.txt"));
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path());
        assert_matches!(result, Err(FileProcessorError::IoError { .. }));
    }

    #[test]
    fn test_size_limit() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("big.txt");
        fs::write(&file_path, "x = 1;".repeat(10)).unwrap();

        let result = FileProcessor::new()
            .with_max_file_size(16)
            .process_file(&file_path);
        assert_matches!(
            result,
            Err(FileProcessorError::FileTooLarge {
                size: 60,
                max_size: 16
            })
        );
    }

    #[test]
    fn test_max_file_size_is_capped() {
        let processor = FileProcessor::new().with_max_file_size(u64::MAX);
        assert_eq!(processor.max_file_size(), MAX_FILE_SIZE);
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.txt");
        fs::write(&file_path, [0x69, 0x6e, 0x74, 0xff, 0xfe]).unwrap();

        let result = FileProcessor::new().process_file(&file_path);
        assert_matches!(result, Err(FileProcessorError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("program.rs");
        fs::write(&file_path, "int x;").unwrap();

        let strict = FileProcessor::new().with_known_extension_required(true);
        assert_matches!(
            strict.process_file(&file_path),
            Err(FileProcessorError::InvalidExtension { extension: Some(ref ext) }) if ext == "rs"
        );
        assert!(FileProcessor::new().process_file(&file_path).is_ok());
    }

    #[test]
    fn test_error_codes() {
        let error = FileProcessorError::FileNotFound {
            path: "x.txt".to_string(),
        };
        assert_eq!(error.error_code().as_str(), "E005");
        assert!(error.requires_halt());
    }

    #[test]
    fn test_human_readable_size() {
        let metadata = FileMetadata {
            path: PathBuf::from("a.txt"),
            size: 2048,
            extension: Some("txt".to_string()),
            line_count: 1,
        };
        assert_eq!(metadata.human_readable_size(), "2.00 KB");
        assert!(metadata.has_known_extension());
    }
}
