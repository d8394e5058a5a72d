// src/main.rs

//! `qvgen` command-line entry point.
//!
//! Exits 0 on success and 1 on any generation failure, with the diagnostic
//! written to stderr.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qvgen::core::constants::qvgen_constants::{
    DEFAULT_CORPUS, DEFAULT_FORMAT_TIMEOUT_SECS, DEFAULT_OUTPUT, TESTS_SUFFIX,
};
use qvgen::{BackupPolicy, FormatterConfig, Generator, GeneratorConfig, SchemaPolicy};

/// Generate Rust test vectors from a quantum gate corpus
#[derive(Parser, Debug)]
#[command(name = "qvgen")]
#[command(about = "Generates statically-typed Rust test vectors from a gate test corpus", long_about = None)]
#[command(version)]
struct Cli {
    /// Corpus registry (JSON object of named entries), relative to the working directory
    #[arg(short, long, env = "QVGEN_CORPUS", default_value = DEFAULT_CORPUS)]
    corpus: PathBuf,

    /// Generated file, relative to the working directory
    #[arg(short, long, env = "QVGEN_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Name suffix marking a registry entry as a test group
    #[arg(long, default_value = TESTS_SUFFIX)]
    suffix: String,

    /// Reject cases whose arguments go beyond their group's struct
    #[arg(long)]
    strict_schema: bool,

    /// Overwrite the previous file instead of keeping it as `<file>.bak`
    #[arg(long)]
    no_backup: bool,

    /// Skip the external formatter
    #[arg(long)]
    no_format: bool,

    /// Formatter executable
    #[arg(long, default_value = "rustfmt")]
    formatter: String,

    /// Formatter argument placed before the file path (repeatable)
    #[arg(long = "formatter-arg", allow_hyphen_values = true)]
    formatter_args: Vec<String>,

    /// Seconds before a running formatter is killed
    #[arg(long, default_value_t = DEFAULT_FORMAT_TIMEOUT_SECS)]
    format_timeout_secs: u64,

    /// Print the generated source instead of writing it
    #[arg(long)]
    stdout: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> GeneratorConfig {
        let formatter = (!self.no_format).then(|| {
            let args = if self.formatter_args.is_empty() && self.formatter == "rustfmt" {
                FormatterConfig::default().args().to_vec()
            } else {
                self.formatter_args
            };
            FormatterConfig::new(self.formatter, args)
                .with_timeout(Duration::from_secs(self.format_timeout_secs))
        });
        let config = GeneratorConfig::new()
            .with_corpus_path(self.corpus)
            .with_output_path(self.output)
            .with_suffix(self.suffix)
            .with_schema_policy(if self.strict_schema {
                SchemaPolicy::Strict
            } else {
                SchemaPolicy::Lenient
            })
            .with_backup(if self.no_backup {
                BackupPolicy::Disabled
            } else {
                BackupPolicy::SingleSlot
            })
            .with_formatter(formatter);
        if self.stdout { config.with_stdout() } else { config }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let to_stdout = cli.stdout;
    let generator = Generator::new(cli.into_config());
    match generator.run() {
        Ok(report) => {
            if to_stdout {
                print!("{}", report.text());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("qvgen: {e}");
            ExitCode::FAILURE
        }
    }
}
