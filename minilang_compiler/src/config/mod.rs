//! Configuration module for the minilang compiler
//! Compile-time limits come from TOML via build.rs; runtime preferences from the environment

// Generated at compile time from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("MINILANG_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("MINILANG_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_time_limits_are_positive() {
        assert!(compile_time::file_processing::MAX_FILE_SIZE > 0);
        assert!(compile_time::lexical::MAX_TOKEN_COUNT > 0);
        assert!(compile_time::syntax::MAX_PARSE_DEPTH > 0);
        assert!(compile_time::syntax::MAX_DERIVATION_STEPS > 0);
        assert!(compile_time::syntax::MAX_DERIVATION_BYTES >= 64);
    }

    #[test]
    fn test_default_source_file_name() {
        assert!(!compile_time::file_processing::DEFAULT_SOURCE_FILE.is_empty());
    }

    #[test]
    fn test_source_info_mentions_profile() {
        let info = build_info::source_info();
        assert!(info.contains(build_info::profile()));
        assert!(info.ends_with(".toml"));
    }
}
