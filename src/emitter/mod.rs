// src/emitter/mod.rs

//! Turns inferred schemas and test groups into Rust source text.

mod canonical;
mod render;

pub use canonical::{COMPLEX_TYPE, Canonicalizer, FRAC_1_SQRT_2_NAME};
pub use render::{CodeEmitter, escape_str};
