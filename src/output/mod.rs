// src/output/mod.rs

//! Materializes generated text on disk.
//!
//! A run rotates any existing artifact into a single backup slot, writes the
//! new text through a sibling temporary file, then hands the file to an
//! external formatter. The formatter runs under a time limit; a hung
//! formatter is killed and reported as a failure.

mod formatter;

pub use formatter::FormatterConfig;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::constants::qvgen_constants::BACKUP_EXTENSION;
use crate::core::{GenError, Result};

/// What happens to an existing artifact before it is overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupPolicy {
    /// Rename it to `<file>.bak`, replacing any previous backup.
    #[default]
    SingleSlot,
    /// Overwrite it in place.
    Disabled,
}

/// Outcome of a successful [`OutputManager::materialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputReport {
    /// Path the artifact was written to.
    pub path: PathBuf,
    /// Where the previous artifact went, if one existed and rotation is enabled.
    pub backup: Option<PathBuf>,
    /// Whether the formatter ran.
    pub formatted: bool,
}

/// Writes one generated artifact to a fixed target path.
#[derive(Debug, Clone)]
pub struct OutputManager {
    target: PathBuf,
    backup: BackupPolicy,
    formatter: Option<FormatterConfig>,
}

impl OutputManager {
    /// Manager for `target` with single-slot backups and no formatter.
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            backup: BackupPolicy::default(),
            formatter: None,
        }
    }

    /// Sets the backup policy.
    pub fn with_backup(mut self, backup: BackupPolicy) -> Self {
        self.backup = backup;
        self
    }

    /// Sets (or clears) the formatter run after writing.
    pub fn with_formatter(mut self, formatter: Option<FormatterConfig>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Target path of the artifact.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Backup slot for the target: `vectors.rs` → `vectors.rs.bak`.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .target
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(BACKUP_EXTENSION);
        self.target.with_file_name(name)
    }

    /// Moves an existing artifact into the backup slot.
    ///
    /// Returns the backup path when a file was moved.
    pub fn rotate(&self) -> Result<Option<PathBuf>> {
        if self.backup == BackupPolicy::Disabled || !self.target.exists() {
            return Ok(None);
        }
        let backup = self.backup_path();
        fs::rename(&self.target, &backup).map_err(|source| GenError::Io {
            path: backup.clone(),
            source,
        })?;
        debug!(backup = %backup.display(), "rotated previous artifact");
        Ok(Some(backup))
    }

    /// Writes `text` to the target, creating parent directories as needed.
    ///
    /// The text lands in a sibling temporary file first and is renamed over
    /// the target.
    pub fn write(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GenError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let mut tmp_name = self
            .target
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp = self.target.with_file_name(tmp_name);
        fs::write(&tmp, text).map_err(|source| GenError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.target).map_err(|source| GenError::Io {
            path: self.target.clone(),
            source,
        })
    }

    /// Rotates, writes and formats in one step.
    ///
    /// # Errors
    /// * `GenError::Io` for filesystem failures.
    /// * `GenError::FormatterSpawn`, `GenError::FormatterFailed` or
    ///   `GenError::FormatterTimeout` from the formatter. The unformatted
    ///   file stays on disk in that case.
    pub fn materialize(&self, text: &str) -> Result<OutputReport> {
        let backup = self.rotate()?;
        self.write(text)?;
        info!("✓ Successfully saved to {}", self.target.display());

        let formatted = match &self.formatter {
            Some(formatter) => {
                info!("Formatting the generated file with '{}'...", formatter.program());
                formatter.run(&self.target)?;
                info!("✓ Formatting successful.");
                true
            }
            None => false,
        };
        Ok(OutputReport {
            path: self.target.clone(),
            backup,
            formatted,
        })
    }
}
