// src/core/mod.rs

//! Core data structures and types

pub mod amplitude;
pub mod case;
pub mod error;
pub mod group;

// Re-export public types for convenient access via `qvgen::core::TypeName`
pub use amplitude::{AmplitudeRepr, basis_label, qubit_count};
pub use case::{ArgValue, TestCase};
pub use error::{GenError, Result};
pub use group::TestGroup;

pub mod constants;
pub use constants::qvgen_constants::{FRAC_1_SQRT_2, TESTS_SUFFIX, TOLERANCE};
