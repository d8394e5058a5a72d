// src/config.rs

//! Run configuration shared by the library entry point and the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::qvgen_constants::{DEFAULT_CORPUS, DEFAULT_OUTPUT, TESTS_SUFFIX};
use crate::emitter::Canonicalizer;
use crate::output::{BackupPolicy, FormatterConfig};
use crate::validation::SchemaPolicy;

/// Where a run writes its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Materialize to a file, with backup rotation and formatting.
    File(PathBuf),
    /// Return the text only; nothing touches the filesystem.
    Stdout,
}

/// Settings for one generation run.
///
/// `Default` reads `scripts/vectors.json`, discovers `_TESTS` groups with
/// lenient schema handling and writes `src/tests/vectors.rs` with a single
/// `.bak` slot, formatted by `rustfmt --edition 2021` within 60 seconds.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    corpus_path: PathBuf,
    output: OutputTarget,
    suffix: String,
    schema_policy: SchemaPolicy,
    backup: BackupPolicy,
    formatter: Option<FormatterConfig>,
    canonicalizer: Canonicalizer,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from(DEFAULT_CORPUS),
            output: OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT)),
            suffix: TESTS_SUFFIX.to_string(),
            schema_policy: SchemaPolicy::default(),
            backup: BackupPolicy::default(),
            formatter: Some(FormatterConfig::default()),
            canonicalizer: Canonicalizer::default(),
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the corpus file read by [`crate::Generator::run`].
    pub fn with_corpus_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.corpus_path = path.into();
        self
    }

    /// Sets the output file.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = OutputTarget::File(path.into());
        self
    }

    /// Sends the generated text to the caller instead of a file.
    pub fn with_stdout(mut self) -> Self {
        self.output = OutputTarget::Stdout;
        self
    }

    /// Sets the group name suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_schema_policy(mut self, policy: SchemaPolicy) -> Self {
        self.schema_policy = policy;
        self
    }

    pub fn with_backup(mut self, backup: BackupPolicy) -> Self {
        self.backup = backup;
        self
    }

    /// Sets the formatter, or disables formatting with `None`.
    pub fn with_formatter(mut self, formatter: Option<FormatterConfig>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Changes the formatter time limit, if a formatter is configured.
    pub fn with_format_timeout(mut self, timeout: Duration) -> Self {
        self.formatter = self.formatter.map(|f| f.with_timeout(timeout));
        self
    }

    pub fn with_canonicalizer(mut self, canonicalizer: Canonicalizer) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    pub fn corpus_path(&self) -> &Path {
        &self.corpus_path
    }

    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn schema_policy(&self) -> SchemaPolicy {
        self.schema_policy
    }

    pub fn backup(&self) -> BackupPolicy {
        self.backup
    }

    pub fn formatter(&self) -> Option<&FormatterConfig> {
        self.formatter.as_ref()
    }

    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.suffix(), "_TESTS");
        assert_eq!(config.output(), &OutputTarget::File(PathBuf::from("src/tests/vectors.rs")));
        assert_eq!(config.schema_policy(), SchemaPolicy::Lenient);
        assert_eq!(config.backup(), BackupPolicy::SingleSlot);
        let formatter = config.formatter().unwrap();
        assert_eq!(formatter.program(), "rustfmt");
        assert_eq!(formatter.args(), ["--edition", "2021"]);
        assert_eq!(formatter.timeout(), Duration::from_secs(60));
        assert_eq!(config.corpus_path(), Path::new("scripts/vectors.json"));
    }

    #[test]
    fn test_timeout_applies_to_configured_formatter_only() {
        let config = GeneratorConfig::new().with_format_timeout(Duration::from_secs(5));
        assert_eq!(config.formatter().unwrap().timeout(), Duration::from_secs(5));

        let config = GeneratorConfig::new()
            .with_formatter(None)
            .with_format_timeout(Duration::from_secs(5));
        assert!(config.formatter().is_none());
    }
}
