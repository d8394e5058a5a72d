// src/validation/mod.rs

//! Provides checks run on a group before its source text is emitted.

use num_complex::Complex64;
use tracing::warn;

use crate::core::{GenError, Result, TestGroup, qubit_count};
use crate::inference::ArgSpec;

/// How a case's numeric arguments outside the group schema are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaPolicy {
    /// Warn and drop the extra fields from emitted output.
    #[default]
    Lenient,
    /// Reject the group with `GenError::SchemaDivergence`.
    Strict,
}

/// A case whose numeric argument keys go beyond its group's schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDivergence {
    /// Position of the case within its group
    pub index: usize,
    /// Numeric keys the schema does not contain, sorted
    pub extra: Vec<String>,
}

/// Checks that a state vector can be rendered with basis labels.
///
/// # Returns
/// * `Ok(n)` with the number of qubits the vector spans.
/// * `Err(GenError::InvalidVectorLength)` if the length is zero or not a power of two.
pub fn check_vector_length(state: &[Complex64]) -> Result<u32> {
    qubit_count(state.len()).ok_or(GenError::InvalidVectorLength { len: state.len() })
}

/// Checks that every amplitude is finite and therefore has a source literal.
pub fn check_finite(state: &[Complex64]) -> Result<()> {
    match state.iter().position(|c| !c.re.is_finite() || !c.im.is_finite()) {
        Some(index) => Err(GenError::NonFiniteAmplitude {
            index,
            re: state[index].re,
            im: state[index].im,
        }),
        None => Ok(()),
    }
}

// Strict and reserved keywords of the 2021 and 2024 editions.
const KEYWORDS: [&str; 52] = [
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

// Keywords that cannot be used even as raw identifiers.
const NON_RAW_KEYWORDS: [&str; 5] = ["crate", "self", "Self", "super", "_"];

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Checks that `name` can be emitted verbatim as a type or static name.
pub fn check_identifier(name: &str) -> Result<()> {
    if is_identifier(name) && !KEYWORDS.contains(&name) {
        Ok(())
    } else {
        Err(GenError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// Field identifier for argument `name`, using a raw identifier for keywords
/// (`type` → `r#type`).
pub fn field_ident(name: &str) -> Result<String> {
    if !is_identifier(name) || NON_RAW_KEYWORDS.contains(&name) {
        return Err(GenError::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    if KEYWORDS.contains(&name) {
        Ok(format!("r#{name}"))
    } else {
        Ok(name.to_string())
    }
}

/// Compares every case's numeric arguments with the group's inferred schema.
///
/// Missing fields are always fatal: the emitted struct literal would be
/// incomplete. Extra fields are collected and, under
/// [`SchemaPolicy::Lenient`], reported with a warning.
///
/// # Arguments
/// * `group` - The group to check.
/// * `schema` - Its inferred schema, `None` for unit-typed groups.
/// * `policy` - Handling of extra fields.
///
/// # Returns
/// * `Ok(divergences)` listing the cases whose extra fields will be dropped.
/// * `Err(GenError::MissingArgs)` or `Err(GenError::SchemaDivergence)`.
pub fn validate_schema(
    group: &TestGroup,
    schema: Option<&ArgSpec>,
    policy: SchemaPolicy,
) -> Result<Vec<SchemaDivergence>> {
    let Some(schema) = schema else {
        return Ok(Vec::new());
    };
    let mut divergences = Vec::new();
    for (index, case) in group.cases().iter().enumerate() {
        let keys = case.numeric_keys();
        let missing: Vec<String> = schema.fields().difference(&keys).cloned().collect();
        if !missing.is_empty() {
            return Err(GenError::MissingArgs {
                group: group.name().to_string(),
                index,
                struct_name: schema.struct_name().to_string(),
                missing,
            });
        }
        for field in schema.fields() {
            if let Some(value) = case.numeric_arg(field).filter(|v| !v.is_finite()) {
                return Err(GenError::NonFiniteArgument {
                    group: group.name().to_string(),
                    index,
                    field: field.clone(),
                    value,
                });
            }
        }
        let extra: Vec<String> = keys.difference(schema.fields()).cloned().collect();
        if extra.is_empty() {
            continue;
        }
        match policy {
            SchemaPolicy::Strict => {
                return Err(GenError::SchemaDivergence {
                    group: group.name().to_string(),
                    index,
                    struct_name: schema.struct_name().to_string(),
                    extra,
                });
            }
            SchemaPolicy::Lenient => {
                warn!(
                    group = group.name(),
                    case = index,
                    "fields {:?} are not part of {} and will be dropped",
                    extra,
                    schema.struct_name()
                );
                divergences.push(SchemaDivergence { index, extra });
            }
        }
    }
    Ok(divergences)
}

/// Runs every per-group check: schema agreement, then each case's vectors.
pub fn validate_group(
    group: &TestGroup,
    schema: Option<&ArgSpec>,
    policy: SchemaPolicy,
) -> Result<Vec<SchemaDivergence>> {
    let divergences = validate_schema(group, schema, policy)?;
    for case in group.cases() {
        for state in [&case.initial_state, &case.expected_state] {
            check_vector_length(state)?;
            check_finite(state)?;
        }
    }
    Ok(divergences)
}
