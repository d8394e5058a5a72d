// src/core/group.rs

use std::fmt;

use super::case::TestCase;

/// A named, ordered sequence of [`TestCase`]s sharing one argument schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TestGroup {
    name: String,
    cases: Vec<TestCase>,
}

impl TestGroup {
    /// Creates a group. Case order is kept as given.
    pub fn new(name: impl Into<String>, cases: Vec<TestCase>) -> Self {
        Self {
            name: name.into(),
            cases,
        }
    }

    /// Registry name, e.g. `PHASE_TESTS`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cases in corpus order.
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Number of cases in the group.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns `true` if the group holds no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl fmt::Display for TestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} cases)", self.name, self.cases.len())
    }
}
