//! Constants shared by inference, emission and output.

/// Generator-wide constants
pub mod qvgen_constants {
    /// Tolerance governing literal selection in the canonicalizer.
    pub const TOLERANCE: f64 = 1e-10;
    /// `1/√2`, the amplitude of an equal two-state superposition.
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
    /// Suffix a registry entry name must carry to be discovered as a group.
    pub const TESTS_SUFFIX: &str = "_TESTS";
    /// Prefix marking registry entries as private.
    pub const PRIVATE_PREFIX: &str = "__";
    /// Appended to the derived struct base name.
    pub const ARGS_SUFFIX: &str = "Args";
    /// One indentation level in emitted source.
    pub const INDENT: &str = "    ";
    /// Extension appended to the output file name for the backup slot.
    pub const BACKUP_EXTENSION: &str = "bak";
    /// Default location of the corpus registry.
    pub const DEFAULT_CORPUS: &str = "scripts/vectors.json";
    /// Default location of the generated artifact.
    pub const DEFAULT_OUTPUT: &str = "src/tests/vectors.rs";
    /// Default formatter time limit in seconds.
    pub const DEFAULT_FORMAT_TIMEOUT_SECS: u64 = 60;
}
