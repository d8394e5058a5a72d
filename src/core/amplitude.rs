// src/core/amplitude.rs

use num_complex::Complex64;
use serde::{Deserialize, Deserializer};

/// Wire forms accepted for a single amplitude in the corpus.
///
/// A bare number is a real amplitude. `[re, im]` and `{"re": .., "im": ..}`
/// carry both components; a missing `im` defaults to zero.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmplitudeRepr {
    /// Real-valued amplitude
    Real(f64),
    /// `[re, im]` pair
    Pair([f64; 2]),
    /// Named components
    Parts {
        /// Real component
        re: f64,
        /// Imaginary component
        #[serde(default)]
        im: f64,
    },
}

impl From<AmplitudeRepr> for Complex64 {
    fn from(repr: AmplitudeRepr) -> Self {
        match repr {
            AmplitudeRepr::Real(re) => Complex64::new(re, 0.0),
            AmplitudeRepr::Pair([re, im]) => Complex64::new(re, im),
            AmplitudeRepr::Parts { re, im } => Complex64::new(re, im),
        }
    }
}

/// Deserializes a dense state vector from any mix of [`AmplitudeRepr`] forms.
pub(crate) fn deserialize_state<'de, D>(deserializer: D) -> Result<Vec<Complex64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<AmplitudeRepr>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(Complex64::from).collect())
}

/// Number of qubits addressed by a vector of `len` amplitudes.
///
/// Returns `None` unless `len` is a non-zero power of two.
pub fn qubit_count(len: usize) -> Option<u32> {
    if len.is_power_of_two() {
        Some(len.trailing_zeros())
    } else {
        None
    }
}

/// Zero-padded binary label of basis state `index` in an `n_qubits` register.
///
/// `basis_label(5, 4) == "0101"`.
pub fn basis_label(index: usize, n_qubits: u32) -> String {
    format!("{:0width$b}", index, width = n_qubits as usize)
}
