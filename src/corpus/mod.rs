// src/corpus/mod.rs

//! The corpus: a registry of named entries, some of which are test groups.
//!
//! The registry is an explicit JSON object. Discovery keeps the entries whose
//! name ends with the group suffix, is not marked private, and holds a
//! non-empty array; everything else (shared constants, notes, empty lists) is
//! skipped without complaint.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::constants::qvgen_constants::PRIVATE_PREFIX;
use crate::core::{GenError, Result, TestCase, TestGroup};

/// One registry value: raw JSON from a corpus file, or a group built in code.
#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Json(Value),
    Group(TestGroup),
}

/// Read-only registry of corpus entries, keyed and ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    entries: BTreeMap<String, Entry>,
}

impl Corpus {
    /// Parses a registry from JSON text.
    ///
    /// # Errors
    /// * `GenError::CorpusParse` if the text is not JSON.
    /// * `GenError::CorpusShape` if the root is not an object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => Ok(Self {
                entries: map
                    .into_iter()
                    .map(|(name, value)| (name, Entry::Json(value)))
                    .collect(),
            }),
            _ => Err(GenError::CorpusShape),
        }
    }

    /// Reads and parses a registry file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GenError::CorpusIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Builds a registry directly from typed groups.
    ///
    /// Cases are kept as given, including values JSON cannot carry, so
    /// validation sees exactly what the caller built.
    pub fn from_groups<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = TestGroup>,
    {
        let entries = groups
            .into_iter()
            .map(|group| (group.name().to_string(), Entry::Group(group)))
            .collect();
        Self { entries }
    }

    /// Number of raw registry entries, groups or not.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Discovers the test groups, sorted by name.
    ///
    /// # Arguments
    /// * `suffix` - Case-sensitive name suffix marking a group (normally `_TESTS`).
    ///
    /// # Errors
    /// * `GenError::MalformedCase` if a discovered group holds a case that does
    ///   not match the [`TestCase`] layout.
    pub fn discover(&self, suffix: &str) -> Result<Vec<TestGroup>> {
        let mut groups = Vec::new();
        for (name, entry) in &self.entries {
            if !name.ends_with(suffix) || name.starts_with(PRIVATE_PREFIX) {
                debug!(entry = %name, "skipping registry entry without group suffix");
                continue;
            }
            let group = match entry {
                Entry::Group(group) => group.clone(),
                Entry::Json(Value::Array(items)) => parse_group(name, items)?,
                Entry::Json(_) => {
                    debug!(entry = %name, "skipping non-sequence registry entry");
                    continue;
                }
            };
            if group.is_empty() {
                debug!(entry = %name, "skipping empty registry entry");
                continue;
            }
            groups.push(group);
        }
        Ok(groups)
    }
}

fn parse_group(name: &str, items: &[Value]) -> Result<TestGroup> {
    let cases = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            TestCase::deserialize(item).map_err(|source| GenError::MalformedCase {
                group: name.to_string(),
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TestGroup::new(name, cases))
}
