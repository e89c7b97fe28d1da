use std::env;
use std::fs;
use std::path::Path;
use std::time::Instant;

use tali_compiler::config::build_info;
use tali_compiler::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use tali_compiler::config::runtime::{FileProcessorPreferences, RuntimeConfig};
use tali_compiler::lexical;
use tali_compiler::logging::{self, codes, LogEvent};
use tali_compiler::repl;
use tali_compiler::utils::SourceMap;
use tali_compiler::{
    log_classified_error, log_error, log_file_metrics, log_info, log_performance, log_success,
};

/// File mode failures, sharing the diagnostic code space of the log events
#[derive(Debug, thiserror::Error)]
enum SourceError {
    #[error("No such file: {path}")]
    NotFound { path: String },

    #[error("Cannot read '{path}': {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("File too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("Expected a .tali file: {path}")]
    WrongExtension { path: String },

    #[error("File is not valid UTF-8: {path}")]
    InvalidEncoding { path: String },
}

impl SourceError {
    fn error_code(&self) -> logging::Code {
        match self {
            SourceError::NotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            SourceError::Unreadable { .. } => codes::file_processing::FILE_READ_FAILED,
            SourceError::TooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            SourceError::WrongExtension { .. } => codes::file_processing::EXTENSION_MISMATCH,
            SourceError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Runtime preferences must be installed before the logging service is built
    let runtime_config = RuntimeConfig::load()?;
    logging::config::init_runtime_preferences(runtime_config.logging.clone())?;
    logging::init_global_logging()?;
    lexical::init_lexical_analysis_logging()?;

    let args: Vec<String> = env::args().collect();
    let options = parse_options(&args[1..]);

    if options.show_help {
        print_help(&args[0]);
        return Ok(());
    }

    if options.show_version {
        println!("tali {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if options.show_diagnostics {
        println!("{}", logging::get_system_diagnostics());
        return Ok(());
    }

    match options.file {
        Some(file_path) => process_file(&file_path, &runtime_config),
        None => {
            if let Err(error) = repl::run_stdio(&runtime_config.repl) {
                log_error!(error.error_code(), "REPL session failed");
                return Err(error.into());
            }
            Ok(())
        }
    }
}

/// Parsed command line
#[derive(Debug, Default)]
struct CliOptions {
    file: Option<String>,
    show_help: bool,
    show_version: bool,
    show_diagnostics: bool,
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                options.show_help = true;
            }
            "--version" | "-V" => {
                options.show_version = true;
            }
            "--diagnostics" => {
                options.show_diagnostics = true;
            }
            arg if arg.starts_with('-') => {
                eprintln!("Warning: Unknown option '{}'", arg);
            }
            arg => {
                if options.file.is_none() {
                    options.file = Some(arg.to_string());
                } else {
                    eprintln!("Warning: Extra argument '{}' ignored", arg);
                }
            }
        }
        i += 1;
    }

    options
}

fn print_help(program_name: &str) {
    println!("Tali tokenizer v{}", env!("CARGO_PKG_VERSION"));
    println!("Lexical analysis for the Tali language");
    println!();
    println!("USAGE:");
    println!(
        "    {}                  # Interactive session (tokens per input line)",
        program_name
    );
    println!(
        "    {} <input.tali>     # Tokenize a source file",
        program_name
    );
    println!();
    println!("ARGUMENTS:");
    println!("    <input.tali>    Path to the source file to tokenize");
    println!();
    println!("OPTIONS:");
    println!("    --help, -h       Show this help message");
    println!("    --version, -V    Print version information");
    println!("    --diagnostics    Print logging and configuration diagnostics");
    println!();
    println!("FILE MODE OUTPUT:");
    println!("    One token per line, caret diagnostics for illegal characters,");
    println!("    nonzero exit status when any illegal token is present");
    println!();
    println!("EXAMPLES:");
    println!("    {} program.tali", program_name);
    println!("    TALI_LOG_LEVEL=debug {} program.tali", program_name);
    println!("    TALI_REPL_SHOW_END_MARKER=true {}", program_name);
    println!();
    println!("BUILD:");
    println!("    Profile: {}", build_info::profile());
    println!("    Limits from: {}", build_info::summary());
}

fn process_file(
    file_path: &str,
    config: &RuntimeConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();

    let source = match read_source(file_path, &config.file_processor) {
        Ok(source) => source,
        Err(error) => {
            log_classified_error!(error.error_code(), "File processing failed");
            eprintln!("FAILED: {}", error);
            std::process::exit(1);
        }
    };

    let source_map = SourceMap::new(source);
    let (tokens, metrics) = lexical::tokenize_with_spans(&source_map, &config.lexical);

    for spanned in &tokens {
        if !spanned.value.is_end() {
            println!("{:?}", spanned.value);
        }
    }

    if config.file_processor.show_source_snippets {
        for spanned in tokens.iter().filter(|spanned| spanned.value.is_illegal()) {
            eprintln!();
            eprintln!(
                "{}",
                source_map.format_error(
                    &spanned.span,
                    &format!("illegal character '{}'", spanned.value.literal),
                )
            );
        }
    }

    if config.lexical.collect_detailed_metrics {
        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed",
            "file" => file_path,
            "tokens" => metrics.total_tokens,
            "keywords" => metrics.keyword_tokens,
            "identifiers" => metrics.identifier_tokens,
            "integers" => metrics.integer_tokens,
            "operators" => metrics.operator_tokens,
            "delimiters" => metrics.delimiter_tokens,
            "illegal" => metrics.illegal_tokens
        );
    } else {
        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed",
            "file" => file_path,
            "tokens" => metrics.total_tokens
        );
    }

    if config.file_processor.enable_performance_logging {
        log_performance!(codes::success::FILE_PROCESSING_SUCCESS,
            "Source file processed",
            duration = started.elapsed(),
            "file" => file_path,
            "size_bytes" => source_map.source().len(),
            "lines" => source_map.line_count()
        );
    } else {
        log_file_metrics!(codes::success::FILE_PROCESSING_SUCCESS,
            "Source file processed",
            file = file_path,
            size = source_map.source().len(),
            lines = source_map.line_count()
        );
    }

    if metrics.has_illegal_tokens() {
        eprintln!(
            "FAILED: {} illegal token(s) in {}",
            metrics.illegal_tokens, file_path
        );
        std::process::exit(1);
    }

    Ok(())
}

/// Read a source file, enforcing the compile-time size limit and the
/// runtime extension preference.
fn read_source(
    file_path: &str,
    preferences: &FileProcessorPreferences,
) -> Result<String, SourceError> {
    let path = Path::new(file_path);

    let metadata = fs::metadata(path).map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            SourceError::NotFound {
                path: file_path.to_string(),
            }
        } else {
            SourceError::Unreadable {
                path: file_path.to_string(),
                source: error,
            }
        }
    })?;

    if metadata.len() > MAX_FILE_SIZE {
        return Err(SourceError::TooLarge {
            size: metadata.len(),
            limit: MAX_FILE_SIZE,
        });
    }

    if path.extension().and_then(|ext| ext.to_str()) != Some("tali") {
        if preferences.require_tali_extension {
            return Err(SourceError::WrongExtension {
                path: file_path.to_string(),
            });
        }

        let event = LogEvent::warning_with_code(
            codes::file_processing::EXTENSION_MISMATCH,
            "File does not carry the .tali extension",
        )
        .with_file_path(file_path);
        logging::dispatch(event);
    }

    if metadata.len() > LARGE_FILE_THRESHOLD {
        log_info!("Processing large file",
            "file" => file_path,
            "size_bytes" => metadata.len(),
            "threshold" => LARGE_FILE_THRESHOLD
        );
    }

    let bytes = fs::read(path).map_err(|error| SourceError::Unreadable {
        path: file_path.to_string(),
        source: error,
    })?;

    let content = String::from_utf8(bytes).map_err(|_| SourceError::InvalidEncoding {
        path: file_path.to_string(),
    })?;

    if content.is_empty() {
        let event = LogEvent::warning_with_code(
            codes::file_processing::EMPTY_FILE,
            "Source file is empty",
        )
        .with_file_path(file_path);
        logging::dispatch(event);
    }

    Ok(content)
}
