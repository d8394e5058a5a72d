// src/core/case.rs

use std::collections::{BTreeMap, BTreeSet};

use num_complex::Complex64;
use serde::Deserialize;
use serde_json::Value;

use super::amplitude::deserialize_state;

/// A named argument value attached to a test case.
///
/// Only [`ArgValue::Number`] values participate in argument schemas; anything
/// else is carried along but never emitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Integer or floating-point parameter (e.g. a rotation fraction)
    Number(f64),
    /// Non-numeric payload
    Other(Value),
}

impl ArgValue {
    /// Numeric value, if this argument is numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ArgValue::Number(v) => Some(*v),
            ArgValue::Other(_) => None,
        }
    }
}

/// One gate-application scenario.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestCase {
    /// Free text, used verbatim in comments and string literals.
    pub description: String,
    /// Qubit indices in call order. Order binds operands and is preserved.
    pub qubits: Vec<u8>,
    /// Amplitudes before the gate is applied.
    #[serde(deserialize_with = "deserialize_state")]
    pub initial_state: Vec<Complex64>,
    /// Amplitudes expected after the gate is applied.
    #[serde(deserialize_with = "deserialize_state")]
    pub expected_state: Vec<Complex64>,
    /// Number of control qubits for controlled variants.
    #[serde(default)]
    pub num_controls: Option<usize>,
    #[serde(default)]
    args: Option<BTreeMap<String, ArgValue>>,
    #[serde(default)]
    kwargs: Option<BTreeMap<String, ArgValue>>,
}

impl TestCase {
    /// Creates a case without arguments.
    pub fn new(
        description: impl Into<String>,
        qubits: Vec<u8>,
        initial_state: Vec<Complex64>,
        expected_state: Vec<Complex64>,
    ) -> Self {
        Self {
            description: description.into(),
            qubits,
            initial_state,
            expected_state,
            num_controls: None,
            args: None,
            kwargs: None,
        }
    }

    /// Sets the number of control qubits.
    pub fn with_controls(mut self, num_controls: usize) -> Self {
        self.num_controls = Some(num_controls);
        self
    }

    /// Adds a numeric argument.
    pub fn with_arg(mut self, name: impl Into<String>, value: f64) -> Self {
        self.args
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), ArgValue::Number(value));
        self
    }

    /// The case's argument mapping. A non-empty `kwargs` takes precedence over `args`.
    pub fn arguments(&self) -> Option<&BTreeMap<String, ArgValue>> {
        match (&self.kwargs, &self.args) {
            (Some(kwargs), _) if !kwargs.is_empty() => Some(kwargs),
            (_, Some(args)) if !args.is_empty() => Some(args),
            _ => None,
        }
    }

    /// Names of the numeric arguments this case exposes, sorted.
    pub fn numeric_keys(&self) -> BTreeSet<String> {
        self.arguments()
            .map(|args| {
                args.iter()
                    .filter(|(_, v)| v.as_number().is_some())
                    .map(|(k, _)| k.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Numeric value of argument `name`, if present.
    pub fn numeric_arg(&self, name: &str) -> Option<f64> {
        self.arguments()
            .and_then(|args| args.get(name))
            .and_then(ArgValue::as_number)
    }
}
