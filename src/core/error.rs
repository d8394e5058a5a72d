// src/core/error.rs

//! Error handling logic

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Failures that abort a generation run.
///
/// Every variant is fatal at the generator's granularity: there is no
/// per-case partial success.
#[derive(Debug, Error)]
pub enum GenError {
    /// The corpus file could not be read.
    #[error("could not load corpus from {}: {source}", .path.display())]
    CorpusIo {
        /// Corpus location
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// The corpus is not valid JSON.
    #[error("corpus is not valid JSON: {0}")]
    CorpusParse(#[from] serde_json::Error),

    /// The corpus root is not an object of named entries.
    #[error("corpus root must be a JSON object mapping entry names to values")]
    CorpusShape,

    /// A case inside a discovered group does not match the case layout.
    #[error("malformed case {index} in {group}: {source}")]
    MalformedCase {
        /// Group the case belongs to
        group: String,
        /// Position of the case within the group
        index: usize,
        /// Deserialization failure
        source: serde_json::Error,
    },

    /// A state vector length is not a power of two.
    #[error("State vector length {len} is not a power of 2")]
    InvalidVectorLength {
        /// Offending length
        len: usize,
    },

    /// An amplitude is NaN or infinite and has no source literal.
    #[error("amplitude at index {index} is not finite ({re}, {im})")]
    NonFiniteAmplitude {
        /// Basis index of the amplitude
        index: usize,
        /// Real part
        re: f64,
        /// Imaginary part
        im: f64,
    },

    /// A case's numeric argument is NaN or infinite.
    #[error("case {index} in {group} has non-finite argument {field} = {value}")]
    NonFiniteArgument {
        /// Group name
        group: String,
        /// Case position
        index: usize,
        /// Argument name
        field: String,
        /// Offending value
        value: f64,
    },

    /// A group, struct or field name cannot be written as a Rust identifier.
    #[error("`{name}` is not a valid Rust identifier")]
    InvalidIdentifier {
        /// Rejected name
        name: String,
    },

    /// A case lacks fields its group's argument struct requires.
    #[error("case {index} in {group} is missing {struct_name} fields {missing:?}")]
    MissingArgs {
        /// Group name
        group: String,
        /// Case position
        index: usize,
        /// Struct inferred for the group
        struct_name: String,
        /// Fields absent from the case
        missing: Vec<String>,
    },

    /// A case carries numeric arguments outside its group's schema (strict mode).
    #[error("case {index} in {group} carries fields {extra:?} not present in {struct_name}")]
    SchemaDivergence {
        /// Group name
        group: String,
        /// Case position
        index: usize,
        /// Struct inferred for the group
        struct_name: String,
        /// Fields the schema does not know
        extra: Vec<String>,
    },

    /// Two groups map to one struct name with different field sets.
    #[error("struct {struct_name} is inferred for {first} and {second} with different fields")]
    StructNameCollision {
        /// Colliding struct name
        struct_name: String,
        /// Group that defined the struct first
        first: String,
        /// Group that disagrees
        second: String,
    },

    /// Rendering a group failed.
    #[error("error generating {group}: {source}")]
    Render {
        /// Group being rendered
        group: String,
        /// Cause
        source: Box<GenError>,
    },

    /// Filesystem failure while materializing output.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being touched
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// The formatter process could not be started.
    #[error("formatter `{program}` could not be started: {source}")]
    FormatterSpawn {
        /// Formatter executable
        program: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// The formatter exited unsuccessfully.
    #[error("formatter `{program}` exited with {status}:\n{output}")]
    FormatterFailed {
        /// Formatter executable
        program: String,
        /// Exit status description
        status: String,
        /// Captured stdout and stderr
        output: String,
    },

    /// The formatter did not finish in time and was killed.
    #[error("formatter `{program}` timed out after {timeout:?}")]
    FormatterTimeout {
        /// Formatter executable
        program: String,
        /// Configured limit
        timeout: Duration,
    },
}

impl GenError {
    /// Wraps an error with the group whose rendering produced it.
    pub fn in_group(self, group: &str) -> Self {
        GenError::Render {
            group: group.to_string(),
            source: Box::new(self),
        }
    }
}
