// src/inference/mod.rs

//! Structural type inference over test-group arguments.
//!
//! Each group whose cases carry named numeric parameters receives an
//! [`ArgSpec`]: a struct name derived from the group name plus the set of
//! `f64` field names. The first case exposing numeric arguments defines the
//! schema for the whole group; [`crate::validation`] checks the remaining
//! cases against it before anything is emitted.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::core::constants::qvgen_constants::ARGS_SUFFIX;
use crate::core::{GenError, Result, TestGroup};

/// Inferred argument schema for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    struct_name: String,
    fields: BTreeSet<String>,
}

impl ArgSpec {
    /// Creates a schema. Field order is irrelevant; duplicates collapse.
    pub fn new<I, S>(struct_name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            struct_name: struct_name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Generated struct name, e.g. `PhaseArgs`.
    pub fn struct_name(&self) -> &str {
        &self.struct_name
    }

    /// Field names in sorted order.
    pub fn fields(&self) -> &BTreeSet<String> {
        &self.fields
    }
}

/// Group name → inferred schema, produced once per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaTable {
    by_group: BTreeMap<String, ArgSpec>,
}

impl SchemaTable {
    /// Schema of `group`, or `None` for groups typed with `()`.
    pub fn get(&self, group: &str) -> Option<&ArgSpec> {
        self.by_group.get(group)
    }

    /// Rust type of the `args` field for `group`.
    pub fn arg_type(&self, group: &str) -> &str {
        self.get(group).map_or("()", ArgSpec::struct_name)
    }

    /// Number of groups with a custom argument struct.
    pub fn len(&self) -> usize {
        self.by_group.len()
    }

    /// Returns `true` when no group carries arguments.
    pub fn is_empty(&self) -> bool {
        self.by_group.is_empty()
    }

    /// Distinct struct definitions, sorted by struct name.
    ///
    /// Groups sharing a struct name share one definition; the first group in
    /// name order wins.
    ///
    /// # Errors
    /// * `GenError::StructNameCollision` if two groups derive the same struct
    ///   name with different fields.
    pub fn distinct_structs(&self) -> Result<Vec<&ArgSpec>> {
        let mut by_name: BTreeMap<&str, (&str, &ArgSpec)> = BTreeMap::new();
        for (group, schema) in &self.by_group {
            match by_name.get(schema.struct_name()) {
                Some((first, existing)) if existing.fields() != schema.fields() => {
                    return Err(GenError::StructNameCollision {
                        struct_name: schema.struct_name().to_string(),
                        first: first.to_string(),
                        second: group.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    by_name.insert(schema.struct_name(), (group.as_str(), schema));
                }
            }
        }
        Ok(by_name.into_values().map(|(_, schema)| schema).collect())
    }

    pub(crate) fn insert(&mut self, group: impl Into<String>, schema: ArgSpec) {
        self.by_group.insert(group.into(), schema);
    }
}

/// Derives the argument struct name for a group.
///
/// The suffix is stripped and each underscore-separated word is capitalized:
/// `PHASE_TESTS` → `PhaseArgs`, `CONTROLLED_PHASE_TESTS` → `ControlledPhaseArgs`.
pub fn struct_name_for(group_name: &str, suffix: &str) -> String {
    let base = group_name.strip_suffix(suffix).unwrap_or(group_name);
    let mut name: String = base
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    name.push_str(ARGS_SUFFIX);
    name
}

/// Infers the schema of a single group.
///
/// Returns `None` when no case carries a non-empty set of numeric arguments.
pub fn infer_group(group: &TestGroup, suffix: &str) -> Option<ArgSpec> {
    group
        .cases()
        .iter()
        .map(|case| case.numeric_keys())
        .find(|keys| !keys.is_empty())
        .map(|keys| ArgSpec::new(struct_name_for(group.name(), suffix), keys))
}

/// One inference pass over every discovered group.
pub fn infer_schemas(groups: &[TestGroup], suffix: &str) -> SchemaTable {
    let mut table = SchemaTable::default();
    for group in groups {
        match infer_group(group, suffix) {
            Some(schema) => {
                debug!(group = group.name(), struct_name = schema.struct_name(), fields = ?schema.fields(), "inferred argument struct");
                table.insert(group.name(), schema);
            }
            None => debug!(group = group.name(), "group carries no numeric arguments"),
        }
    }
    info!("Discovered {} test groups with custom arguments.", table.len());
    table
}
