//! Compile-time limits and runtime preferences.
//!
//! `compile_time` is generated by build.rs from the active profile under
//! config/; [`runtime`] layers environment-driven preferences on top of it.

// Pulls in `pub mod compile_time` with the baked limit constants.
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::RuntimeConfig;

/// Which profile the constants were baked from.
pub mod build_info {
    pub fn profile() -> &'static str {
        option_env!("TALI_BUILD_PROFILE").unwrap_or("development")
    }

    pub fn config_dir() -> &'static str {
        option_env!("TALI_CONFIG_DIR").unwrap_or("config")
    }

    /// Human-readable pointer to the TOML the build consumed.
    pub fn summary() -> String {
        format!("{}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baked_constants_are_sane() {
        assert!(compile_time::file_processing::MAX_FILE_SIZE > 0);
        assert!(
            compile_time::file_processing::LARGE_FILE_THRESHOLD
                <= compile_time::file_processing::MAX_FILE_SIZE
        );
        assert!(compile_time::lexical::TOKEN_BUFFER_CAPACITY > 0);
        assert!(!compile_time::repl::PROMPT.is_empty());
        assert!(compile_time::logging::LOG_BUFFER_SIZE > 0);
    }

    #[test]
    fn test_build_info_names_a_toml() {
        assert!(!build_info::profile().is_empty());
        assert!(build_info::summary().ends_with(".toml"));
    }
}
