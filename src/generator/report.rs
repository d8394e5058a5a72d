// src/generator/report.rs
use std::fmt;

use crate::output::OutputReport;

/// One emitted static collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    /// Static name, e.g. `PHASE_TESTS`.
    pub name: String,
    /// Type of the `args` field, `()` for groups without arguments.
    pub arg_type: String,
    /// Number of cases emitted.
    pub cases: usize,
}

/// Outcome of a successful generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    groups: Vec<GroupSummary>,
    struct_count: usize,
    text: String,
    output: Option<OutputReport>,
}

impl GenerationReport {
    pub(crate) fn new(groups: Vec<GroupSummary>, struct_count: usize, text: String) -> Self {
        Self {
            groups,
            struct_count,
            text,
            output: None,
        }
    }

    pub(crate) fn with_output(mut self, output: OutputReport) -> Self {
        self.output = Some(output);
        self
    }

    /// Emitted groups in output order.
    pub fn groups(&self) -> &[GroupSummary] {
        &self.groups
    }

    /// Number of distinct argument structs defined.
    pub fn struct_count(&self) -> usize {
        self.struct_count
    }

    /// The generated source text, before external formatting.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where the text was written, or `None` when it was only rendered.
    pub fn output(&self) -> Option<&OutputReport> {
        self.output.as_ref()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Generated {} static collections and {} argument structs",
            self.groups.len(),
            self.struct_count
        )?;
        for group in &self.groups {
            writeln!(f, "  {}<{}>: {} cases", group.name, group.arg_type, group.cases)?;
        }
        if let Some(output) = &self.output {
            write!(f, "  written to {}", output.path.display())?;
            if let Some(backup) = &output.backup {
                write!(f, " (previous kept at {})", backup.display())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
