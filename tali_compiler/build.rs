// Bakes the selected config/ profile into compile-time constants.
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

// Hard ceilings no profile may exceed, regardless of environment.
const FILE_SIZE_CEILING: u64 = 1_000_000_000;
const LOG_BUFFER_CEILING: usize = 1_000_000;

// Shape of a build profile TOML. Table and key names mirror config/*.toml.
#[derive(serde::Deserialize)]
struct BuildProfile {
    file_processing: FileLimits,
    lexical: LexLimits,
    repl: ReplSettings,
    logging: LogLimits,
}

#[derive(serde::Deserialize)]
struct FileLimits {
    max_file_size: u64,
    large_file_threshold: u64,
}

#[derive(serde::Deserialize)]
struct LexLimits {
    max_identifier_length: usize,
    token_buffer_capacity: usize,
}

#[derive(serde::Deserialize)]
struct ReplSettings {
    prompt: String,
    max_input_line_length: usize,
}

#[derive(serde::Deserialize)]
struct LogLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TALI_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=TALI_CONFIG_DIR");

    let profile = env_or("TALI_BUILD_PROFILE", "development");
    let config_dir = env_or("TALI_CONFIG_DIR", "config");
    let profile_path = locate_profile(&config_dir, &profile);

    println!("cargo:rerun-if-changed={}", profile_path.display());

    let limits = load_profile(&profile_path);
    check_profile(&limits, &profile);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let out_path = Path::new(&out_dir).join("constants.rs");
    fs::write(&out_path, render_constants(&limits, &profile))
        .unwrap_or_else(|e| panic!("failed to write {}: {}", out_path.display(), e));

    println!(
        "cargo:warning=Compile-time limits baked from {}",
        profile_path.display()
    );
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

// Profiles live at <workspace>/<config_dir>/<profile>.toml, one level above
// this crate's manifest.
fn locate_profile(config_dir: &str, profile: &str) -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    Path::new(&manifest_dir)
        .parent()
        .expect("tali_compiler sits one level below the workspace root")
        .join(config_dir)
        .join(format!("{profile}.toml"))
}

fn load_profile(path: &Path) -> BuildProfile {
    let raw = fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "cannot read build profile {}: {}\nexpected a TOML file under <workspace>/config/ \
             (override with TALI_BUILD_PROFILE / TALI_CONFIG_DIR)",
            path.display(),
            e
        )
    });
    toml::from_str(&raw)
        .unwrap_or_else(|e| panic!("{} is not a valid build profile: {}", path.display(), e))
}

fn check_profile(limits: &BuildProfile, profile: &str) {
    let fp = &limits.file_processing;
    assert!(
        fp.max_file_size <= FILE_SIZE_CEILING,
        "max_file_size {} exceeds the {} byte ceiling",
        fp.max_file_size,
        FILE_SIZE_CEILING
    );
    assert!(
        fp.large_file_threshold <= fp.max_file_size,
        "large_file_threshold {} must not exceed max_file_size {}",
        fp.large_file_threshold,
        fp.max_file_size
    );
    assert!(
        limits.logging.log_buffer_size <= LOG_BUFFER_CEILING,
        "log_buffer_size {} exceeds the {} entry ceiling",
        limits.logging.log_buffer_size,
        LOG_BUFFER_CEILING
    );
    assert!(
        !limits.repl.prompt.is_empty(),
        "repl prompt must not be empty"
    );
    assert!(
        limits.lexical.token_buffer_capacity > 0,
        "token_buffer_capacity must be non-zero"
    );
    assert!(
        limits.repl.max_input_line_length > 0,
        "max_input_line_length must be non-zero"
    );

    if profile == "production" {
        assert!(
            fp.max_file_size <= 50_000_000,
            "production profiles cap max_file_size at 50 MB, got {}",
            fp.max_file_size
        );
        assert!(
            limits.logging.log_buffer_size <= 4096,
            "production profiles cap log_buffer_size at 4096, got {}",
            limits.logging.log_buffer_size
        );
    }
}

fn render_constants(limits: &BuildProfile, profile: &str) -> String {
    let sections = [
        section(
            "file_processing",
            &[
                (
                    "MAX_FILE_SIZE: u64",
                    limits.file_processing.max_file_size.to_string(),
                ),
                (
                    "LARGE_FILE_THRESHOLD: u64",
                    limits.file_processing.large_file_threshold.to_string(),
                ),
            ],
        ),
        section(
            "lexical",
            &[
                (
                    "MAX_IDENTIFIER_LENGTH: usize",
                    limits.lexical.max_identifier_length.to_string(),
                ),
                (
                    "TOKEN_BUFFER_CAPACITY: usize",
                    limits.lexical.token_buffer_capacity.to_string(),
                ),
            ],
        ),
        section(
            "repl",
            &[
                ("PROMPT: &str", format!("{:?}", limits.repl.prompt)),
                (
                    "MAX_INPUT_LINE_LENGTH: usize",
                    limits.repl.max_input_line_length.to_string(),
                ),
            ],
        ),
        section(
            "logging",
            &[
                (
                    "LOG_BUFFER_SIZE: usize",
                    limits.logging.log_buffer_size.to_string(),
                ),
                (
                    "MAX_LOG_MESSAGE_LENGTH: usize",
                    limits.logging.max_log_message_length.to_string(),
                ),
            ],
        ),
    ];

    format!(
        "// Generated by build.rs from the `{profile}` build profile.\n\
         // Edit config/{profile}.toml and rebuild; this file is overwritten.\n\n\
         pub mod compile_time {{\n{}}}\n",
        sections.join("\n")
    )
}

fn section(name: &str, consts: &[(&str, String)]) -> String {
    let mut block = format!("    pub mod {name} {{\n");
    for (decl, value) in consts {
        let _ = writeln!(block, "        pub const {decl} = {value};");
    }
    block.push_str("    }\n");
    block
}
