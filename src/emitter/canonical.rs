// src/emitter/canonical.rs

//! Maps complex amplitudes to the shortest exact Rust literal.
//!
//! Well-known values are written as named constants so the generated source
//! stays auditable: `Complex64::ZERO`, `Complex64::ONE`, `Complex64::I`, their
//! negations, and `FRAC_1_SQRT_2`. Integral components become `k.0`; anything
//! else is written with the shortest decimal that round-trips to the same
//! `f64`.

use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::core::{FRAC_1_SQRT_2, TOLERANCE};

/// Type name used in every emitted amplitude literal.
pub const COMPLEX_TYPE: &str = "Complex64";
/// Name of the `1/√2` constant imported by the generated file.
pub const FRAC_1_SQRT_2_NAME: &str = "FRAC_1_SQRT_2";

/// Amplitude-to-literal converter with a fixed selection tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canonicalizer {
    tolerance: f64,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Canonicalizer {
    /// Canonicalizer using the generator tolerance (`1e-10`).
    pub fn new() -> Self {
        Self::with_tolerance(TOLERANCE)
    }

    /// Canonicalizer with a custom tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Tolerance used for every comparison.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Renders one amplitude as a `Complex64` expression.
    ///
    /// Rules, first match wins:
    /// 1. `0`, `1`, `-1`, `i`, `-i` map to the named unit constants.
    /// 2. A negligible imaginary part leaves a real literal `Complex64::from(..)`.
    /// 3. Otherwise both components are formatted independently into
    ///    `Complex64::new(re, im)`.
    pub fn literal(&self, value: Complex64) -> String {
        if let Some(unit) = self.unit_literal(value) {
            return unit.to_string();
        }
        if self.is_zero(value.im) {
            return format!("{COMPLEX_TYPE}::from({})", self.component(value.re));
        }
        format!(
            "{COMPLEX_TYPE}::new({}, {})",
            self.component(value.re),
            self.component(value.im)
        )
    }

    /// Renders one real component as an `f64` expression.
    ///
    /// `±1/√2` becomes a reference to the named constant, integral values
    /// become `k.0`, and the rest use Rust's shortest round-trip formatting.
    pub fn component(&self, value: f64) -> String {
        if (value.abs() - FRAC_1_SQRT_2).abs() <= self.tolerance {
            let sign = if value > 0.0 { "" } else { "-" };
            return format!("{sign}{FRAC_1_SQRT_2_NAME}");
        }
        let rounded = value.round();
        if (value - rounded).abs() < self.tolerance {
            if rounded == 0.0 {
                return "0.0".to_string();
            }
            return format!("{rounded:.1}");
        }
        format!("{value:?}")
    }

    fn unit_literal(&self, value: Complex64) -> Option<&'static str> {
        let units = [
            (Complex64::zero(), "Complex64::ZERO"),
            (Complex64::one(), "Complex64::ONE"),
            (-Complex64::one(), "-Complex64::ONE"),
            (Complex64::i(), "Complex64::I"),
            (-Complex64::i(), "-Complex64::I"),
        ];
        units
            .iter()
            .find(|(unit, _)| self.is_zero(value.re - unit.re) && self.is_zero(value.im - unit.im))
            .map(|(_, literal)| *literal)
    }

    fn is_zero(&self, value: f64) -> bool {
        value.abs() < self.tolerance
    }
}
