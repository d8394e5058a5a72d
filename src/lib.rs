// src/lib.rs

//! `qvgen` - A generator for statically-typed quantum gate test vectors
//!
//! This library reads a registry of quantum gate test groups (initial state,
//! expected state, target qubits and optional numeric arguments per case),
//! infers one argument struct per group, and emits a Rust source file holding
//! one `LazyLock` static per group. Amplitudes are written as the shortest
//! exact `Complex64` literal so the generated file stays reviewable.

pub mod core;
pub mod corpus;
pub mod inference;
pub mod validation;
pub mod emitter;
pub mod output;
pub mod config;
pub mod generator;

// Re-export the most common types for easier top-level use
pub use crate::core::{GenError, Result, TestCase, TestGroup};
pub use crate::corpus::Corpus;
pub use crate::inference::{ArgSpec, SchemaTable, infer_schemas};
pub use crate::validation::SchemaPolicy;
pub use crate::emitter::{Canonicalizer, CodeEmitter};
pub use crate::output::{BackupPolicy, FormatterConfig, OutputManager, OutputReport};
pub use crate::config::{GeneratorConfig, OutputTarget};
pub use crate::generator::{GenerationReport, Generator, GroupSummary};

// Example 1: Rendering a group without arguments
// A NOT gate case flips |0⟩ to |1⟩; its amplitudes map to the named unit
// constants and the group is typed over `()`.
/// ```
/// use qvgen::{Corpus, Generator, GenError};
///
/// let corpus = Corpus::from_json_str(r#"{
///     "NOT_TESTS": [{
///         "description": "flip",
///         "qubits": [0],
///         "initial_state": [1, 0],
///         "expected_state": [0, 1]
///     }],
///     "SHARED_CONSTANT": 3
/// }"#)?;
///
/// let report = Generator::default().render(&corpus)?;
/// let text = report.text();
/// assert!(text.contains("pub(crate) static NOT_TESTS: LazyLock<Vec<TestVector<()>>>"));
/// assert!(text.contains("Complex64::ONE, // |0⟩"));
/// assert!(text.contains("Complex64::ZERO, // |1⟩"));
/// assert!(text.contains("// No custom argument structs needed."));
/// # Ok::<(), GenError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Inferring an argument struct
// The first case carrying numeric arguments defines the struct for its group.
/// ```
/// use qvgen::{Corpus, Generator, GenError};
///
/// let corpus = Corpus::from_json_str(r#"{
///     "PHASE_TESTS": [{
///         "description": "S gate on |1⟩",
///         "qubits": [0],
///         "initial_state": [0, 1],
///         "expected_state": [0, [0, 1]],
///         "args": {"fraction": 0.25}
///     }]
/// }"#)?;
///
/// let report = Generator::default().render(&corpus)?;
/// assert_eq!(report.groups()[0].arg_type, "PhaseArgs");
/// assert!(report.text().contains("pub(crate) struct PhaseArgs {"));
/// assert!(report.text().contains("args: PhaseArgs { fraction: 0.25 },"));
/// assert!(report.text().contains("Complex64::I, // |1⟩"));
/// # Ok::<(), GenError>(())
/// ```
#[doc(hidden)]
const _: () = ();
