use blobpack::{Result, SkipReason, concat, split};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

const LONG_HELP: &str = r#"
Blob format:
  === relative/path.py ===   - marker line starting a file record
  <file content>             - the file's text, verbatim
  <blank line>               - separator before the next record

Examples:
  # Pack a project into one blob
  blobpack --mode concat --input ./proj --output blob.txt
  # Restrict packing to specific suffixes
  blobpack --mode concat --input ./proj --output blob.txt --extensions .rs .toml
  # Unpack a (possibly edited) blob back into files
  blobpack --mode split --input blob.txt --output ./restored

Filtering (concat):
  Patterns come from <input>/.gitignore when present, otherwise a built-in
  default set (.git/, node_modules/, __pycache__/, virtualenvs, IDE folders).
  Hidden files and non-UTF-8 (binary) files are always skipped.
"#;

/// Pack a project into one annotated text blob, or split a blob back into files.
#[derive(Parser, Debug)]
#[command(
    name = "blobpack",
    version,
    about = "Pack a project into one annotated text blob for LLMs, or split a blob back into files.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Operation mode
    #[arg(long, value_enum)]
    mode: Mode,

    /// Source directory (concat) or blob file (split)
    #[arg(long, value_name = "PATH")]
    input: PathBuf,

    /// Destination blob file (concat) or destination directory (split)
    #[arg(long, value_name = "PATH")]
    output: PathBuf,

    /// Allowed file suffixes for concat, each including its leading dot
    /// (defaults: .py .js .jsx .ts .tsx .css .scss .html)
    #[arg(long, value_name = "EXT", num_args = 1..)]
    extensions: Option<Vec<String>>,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Walk a directory tree and pack matching files into one blob
    Concat,
    /// Split a blob back into individual files
    Split,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => LogLevel::Error,
        (false, 0) => LogLevel::Warn,
        (false, 1) => LogLevel::Info,
        (false, _) => LogLevel::Debug,
    };

    let result = match cli.mode {
        Mode::Concat => run_concat(&cli, log_level),
        Mode::Split => run_split(&cli, log_level),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_concat(cli: &Cli, log_level: LogLevel) -> Result<()> {
    log(
        log_level,
        LogLevel::Info,
        &format!(
            "Packing {} into {}",
            cli.input.display(),
            cli.output.display()
        ),
    );

    let summary = concat(&cli.input, &cli.output, cli.extensions.as_deref())?;

    for warning in &summary.pattern_warnings {
        log(log_level, LogLevel::Warn, warning);
    }
    for skipped in &summary.skipped {
        let reason = match &skipped.reason {
            SkipReason::NotUtf8 => "not UTF-8 text, skipped".to_string(),
            SkipReason::Unreadable(e) => format!("unreadable, skipped: {e}"),
        };
        log(
            log_level,
            LogLevel::Warn,
            &format!("{}: {reason}", skipped.path),
        );
    }

    if !cli.quiet {
        println!(
            "{} files written to {}",
            summary.written,
            cli.output.display()
        );
        if !summary.skipped.is_empty() {
            println!("{} files skipped", summary.skipped.len());
        }
    }
    Ok(())
}

fn run_split(cli: &Cli, log_level: LogLevel) -> Result<()> {
    if cli.extensions.is_some() {
        log(
            log_level,
            LogLevel::Warn,
            "--extensions has no effect in split mode",
        );
    }

    log(
        log_level,
        LogLevel::Info,
        &format!(
            "Splitting {} into {}",
            cli.input.display(),
            cli.output.display()
        ),
    );

    let summary = split(&cli.input, &cli.output)?;

    for skipped in &summary.skipped {
        log(
            log_level,
            LogLevel::Warn,
            &format!("{}: {}, skipped", skipped.path, skipped.reason),
        );
    }

    if !cli.quiet {
        println!(
            "{} files written to {}",
            summary.written,
            cli.output.display()
        );
        if !summary.skipped.is_empty() {
            println!("{} records skipped", summary.skipped.len());
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

fn log(current_level: LogLevel, message_level: LogLevel, message: &str) {
    if message_level >= current_level {
        eprintln!(
            "[{}] {}",
            match message_level {
                LogLevel::Debug => "DEBUG",
                LogLevel::Info => "INFO",
                LogLevel::Warn => "WARN",
                LogLevel::Error => "ERROR",
            },
            message
        );
    }
}
