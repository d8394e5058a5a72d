// src/emitter/render.rs

use num_complex::Complex64;
use tracing::{error, info};

use super::canonical::Canonicalizer;
use crate::core::constants::qvgen_constants::INDENT;
use crate::core::{Result, TestCase, TestGroup, basis_label};
use crate::inference::{ArgSpec, SchemaTable};
use crate::validation::{self, SchemaPolicy};

const HEADER: [&str; 7] = [
    "// This file is auto-generated by qvgen. Do not edit manually.",
    "// It uses a generic TestVector<T> struct and domain-based arg structs.",
    "",
    "#[allow(unused_imports)]",
    "use std::{f64::consts::FRAC_1_SQRT_2, sync::LazyLock};",
    "use num_complex::Complex64;",
    "",
];

const TEST_VECTOR_DEF: [&str; 11] = [
    "// --- Generic TestVector ---",
    "#[derive(Debug, PartialEq)]",
    "pub(crate) struct TestVector<T> {",
    "    pub(crate) description: &'static str,",
    "    pub(crate) qubits: Vec<u8>,",
    "    pub(crate) initial_state: Vec<Complex64>,",
    "    pub(crate) expected_state: Vec<Complex64>,",
    "    pub(crate) num_controls: Option<usize>,",
    "    pub(crate) args: T,",
    "}",
    "",
];

/// Renders inferred schemas and test groups as Rust source text.
///
/// Output is a pure function of the groups and the schema table: struct
/// definitions are sorted by name, groups keep the order they are given in,
/// and cases keep corpus order.
#[derive(Debug, Clone)]
pub struct CodeEmitter<'a> {
    schemas: &'a SchemaTable,
    canonicalizer: Canonicalizer,
    policy: SchemaPolicy,
}

impl<'a> CodeEmitter<'a> {
    /// Creates an emitter over an inference result.
    pub fn new(schemas: &'a SchemaTable) -> Self {
        Self {
            schemas,
            canonicalizer: Canonicalizer::new(),
            policy: SchemaPolicy::default(),
        }
    }

    /// Replaces the amplitude canonicalizer.
    pub fn with_canonicalizer(mut self, canonicalizer: Canonicalizer) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    /// Sets how schema divergence within a group is handled.
    pub fn with_policy(mut self, policy: SchemaPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Renders the complete file for `groups`.
    ///
    /// All text is accumulated in memory; the first failing group aborts the
    /// run and nothing is returned.
    ///
    /// # Errors
    /// * `GenError::Render` wrapping the cause of the first failing group.
    /// * `GenError::StructNameCollision` from the struct section.
    pub fn emit(&self, groups: &[TestGroup]) -> Result<String> {
        let mut lines = self.header()?;
        info!("Generating {} Rust static variables.", groups.len());
        for group in groups {
            match self.render_group(group) {
                Ok(block) => {
                    lines.push(block);
                    lines.push(String::new());
                    info!(
                        "  ✓ Generated {}<{}> with {} cases",
                        group.name(),
                        self.schemas.arg_type(group.name()),
                        group.len()
                    );
                }
                Err(e) => {
                    error!("  ✗ Error generating {}: {}", group.name(), e);
                    return Err(e.in_group(group.name()));
                }
            }
        }
        let mut text = lines.join("\n");
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }

    /// Header comment, imports, argument structs and the `TestVector<T>` type.
    pub fn header(&self) -> Result<Vec<String>> {
        let mut lines: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();
        lines.push("// --- Argument Structs (Auto-generated from test groups) ---".to_string());
        let structs = self.schemas.distinct_structs()?;
        if structs.is_empty() {
            lines.push("// No custom argument structs needed.".to_string());
            lines.push(String::new());
        }
        for schema in structs {
            lines.extend(self.render_struct(schema)?);
        }
        lines.extend(TEST_VECTOR_DEF.iter().map(|s| s.to_string()));
        Ok(lines)
    }

    fn render_struct(&self, schema: &ArgSpec) -> Result<Vec<String>> {
        validation::check_identifier(schema.struct_name())?;
        let mut lines = vec![
            "#[derive(Debug, PartialEq, Clone, Copy)]".to_string(),
            format!("pub(crate) struct {} {{", schema.struct_name()),
        ];
        for field in schema.fields() {
            let ident = validation::field_ident(field)?;
            lines.push(format!("{INDENT}pub(crate) {ident}: f64,"));
        }
        lines.push("}".to_string());
        lines.push(String::new());
        Ok(lines)
    }

    /// Renders one group as a `LazyLock` static, after validating it.
    pub fn render_group(&self, group: &TestGroup) -> Result<String> {
        validation::check_identifier(group.name())?;
        let schema = self.schemas.get(group.name());
        validation::validate_group(group, schema, self.policy)?;

        let arg_type = self.schemas.arg_type(group.name());
        let mut lines = vec![
            format!(
                "pub(crate) static {}: LazyLock<Vec<TestVector<{}>>> = LazyLock::new(|| {{",
                group.name(),
                arg_type
            ),
            format!("{INDENT}vec!["),
        ];
        for case in group.cases() {
            lines.extend(self.render_case(case, schema)?);
        }
        lines.push(format!("{INDENT}]"));
        lines.push("});".to_string());
        Ok(lines.join("\n"))
    }

    fn render_case(&self, case: &TestCase, schema: Option<&ArgSpec>) -> Result<Vec<String>> {
        let outer = INDENT.repeat(2);
        let inner = INDENT.repeat(3);
        let num_controls = match case.num_controls {
            Some(n) => format!("Some({n})"),
            None => "None".to_string(),
        };
        Ok(vec![
            format!("{outer}// {}", comment_text(&case.description)),
            format!("{outer}TestVector {{"),
            format!("{inner}description: \"{}\",", escape_str(&case.description)),
            format!("{inner}qubits: {},", qubits_literal(&case.qubits)),
            format!("{inner}num_controls: {num_controls},"),
            format!("{inner}args: {},", args_literal(case, schema)?),
            format!(
                "{inner}initial_state: {},",
                self.render_state_vector(&case.initial_state, 3)?
            ),
            format!(
                "{inner}expected_state: {},",
                self.render_state_vector(&case.expected_state, 3)?
            ),
            format!("{outer}}},"),
        ])
    }

    /// Renders a state vector as a `vec![..]` literal, one amplitude per line,
    /// each tagged with its basis label.
    ///
    /// # Arguments
    /// * `state` - Amplitudes; the length must be a power of two.
    /// * `indent_level` - Indentation of the line the literal starts on.
    ///
    /// # Errors
    /// * `GenError::InvalidVectorLength` if the length is not a power of two.
    pub fn render_state_vector(&self, state: &[Complex64], indent_level: usize) -> Result<String> {
        let n_qubits = validation::check_vector_length(state)?;
        let base = INDENT.repeat(indent_level);
        let mut text = String::from("vec![\n");
        for (i, amp) in state.iter().enumerate() {
            text.push_str(&format!(
                "{base}{INDENT}{}, // |{}⟩\n",
                self.canonicalizer.literal(*amp),
                basis_label(i, n_qubits)
            ));
        }
        text.push_str(&base);
        text.push(']');
        Ok(text)
    }
}

fn args_literal(case: &TestCase, schema: Option<&ArgSpec>) -> Result<String> {
    let Some(schema) = schema else {
        return Ok("()".to_string());
    };
    let fields = schema
        .fields()
        .iter()
        .map(|field| {
            let ident = validation::field_ident(field)?;
            // validate_group has already confirmed every field is present.
            let value = case.numeric_arg(field).unwrap_or_default();
            Ok(format!("{ident}: {value:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("{} {{ {} }}", schema.struct_name(), fields.join(", ")))
}

fn qubits_literal(qubits: &[u8]) -> String {
    let items: Vec<String> = qubits.iter().map(u8::to_string).collect();
    format!("vec![{}]", items.join(", "))
}

/// Escapes text for use inside a Rust string literal. Non-ASCII characters
/// such as `⟩` are kept as-is.
pub fn escape_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            _ => out.push(ch),
        }
    }
    out
}

// Line comments end at the first newline.
fn comment_text(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}
