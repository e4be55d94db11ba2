//! File processor module with compile-time size limit and global logging integration

mod processor;

use crate::config::compile_time::file_processing::{DEFAULT_SOURCE_FILE, MAX_FILE_SIZE};
use crate::config::runtime::FileProcessorPreferences;
use std::path::{Path, PathBuf};

pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, KNOWN_EXTENSIONS,
};

/// Read a file with preferences from the environment
pub fn process_file(
    file_path: impl AsRef<Path>,
) -> Result<FileProcessingResult, FileProcessorError> {
    create_processor_from_preferences(&FileProcessorPreferences::default()).process_file(file_path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// The compile-time maximum file size
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

/// Where the source file is looked for when none is given: next to the
/// running executable
pub fn default_source_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(DEFAULT_SOURCE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("minilang.txt");
        fs::write(&file_path, "print(1);").unwrap();

        let result = process_file(&file_path).unwrap();
        assert_eq!(result.source, "print(1);");
    }

    #[test]
    fn test_create_processor_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_known_extension: true,
            enable_performance_logging: false,
        };

        let processor = create_processor_from_preferences(&prefs);
        assert!(processor.require_known_extension);
        assert!(!processor.enable_performance_logging);
        assert_eq!(processor.max_file_size(), get_max_file_size());
    }

    #[test]
    fn test_default_source_path() {
        let path = default_source_path().unwrap();
        assert_eq!(path.file_name().unwrap(), DEFAULT_SOURCE_FILE);
    }
}
