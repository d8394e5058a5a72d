// tests/generation_tests.rs

// Import necessary types from the qvgen crate
use qvgen::{Corpus, GenError, GenerationReport, Generator, GeneratorConfig, SchemaPolicy};

use num_complex::Complex64;
use std::path::PathBuf;

// Helper to render a corpus given as JSON text with default settings
fn render(json: &str) -> Result<GenerationReport, GenError> {
    let corpus = Corpus::from_json_str(json)?;
    Generator::default().render(&corpus)
}

// Helper to unwrap the per-group wrapper around a rendering failure
fn render_cause(err: GenError) -> (String, GenError) {
    match err {
        GenError::Render { group, source } => (group, *source),
        other => panic!("Expected a per-group render failure, got {:?}", other),
    }
}

fn demo_corpus_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/corpus/vectors.json")
}

const FLIP: &str = r#"{
    "NOT_TESTS": [{
        "description": "flip",
        "qubits": [0],
        "initial_state": [1, 0],
        "expected_state": [0, 1]
    }]
}"#;

#[test]
fn test_flip_case_uses_unit_constants() -> Result<(), GenError> {
    let report = render(FLIP)?;
    let expected_block = r#"pub(crate) static NOT_TESTS: LazyLock<Vec<TestVector<()>>> = LazyLock::new(|| {
    vec![
        // flip
        TestVector {
            description: "flip",
            qubits: vec![0],
            num_controls: None,
            args: (),
            initial_state: vec![
                Complex64::ONE, // |0⟩
                Complex64::ZERO, // |1⟩
            ],
            expected_state: vec![
                Complex64::ZERO, // |0⟩
                Complex64::ONE, // |1⟩
            ],
        },
    ]
});
"#;
    assert!(
        report.text().ends_with(expected_block),
        "Unexpected output:\n{}",
        report.text()
    );
    assert_eq!(report.struct_count(), 0);
    Ok(())
}

#[test]
fn test_file_layout() -> Result<(), GenError> {
    let text = render(FLIP)?.text().to_string();
    assert!(text.starts_with("// This file is auto-generated by qvgen. Do not edit manually.\n"));

    let imports = text.find("use num_complex::Complex64;").unwrap();
    let structs = text.find("// --- Argument Structs").unwrap();
    let vector_type = text.find("pub(crate) struct TestVector<T> {").unwrap();
    let statics = text.find("pub(crate) static NOT_TESTS").unwrap();
    assert!(imports < structs && structs < vector_type && vector_type < statics);

    assert!(text.contains("use std::{f64::consts::FRAC_1_SQRT_2, sync::LazyLock};"));
    assert!(text.contains("// No custom argument structs needed."));
    assert!(text.contains("    pub(crate) num_controls: Option<usize>,\n    pub(crate) args: T,\n}"));
    assert!(text.ends_with("});\n"));
    Ok(())
}

#[test]
fn test_phase_group_infers_struct() -> Result<(), GenError> {
    let report = render(
        r#"{
        "PHASE_TESTS": [{
            "description": "Phase shift by π/2 on |1⟩ → i|1⟩",
            "qubits": [0],
            "args": {"fraction": 0.25},
            "initial_state": [0, 1],
            "expected_state": [0, [0, 1]]
        }]
    }"#,
    )?;
    let text = report.text();
    assert!(text.contains(
        "#[derive(Debug, PartialEq, Clone, Copy)]\npub(crate) struct PhaseArgs {\n    pub(crate) fraction: f64,\n}\n"
    ));
    assert!(text.contains("LazyLock<Vec<TestVector<PhaseArgs>>>"));
    assert!(text.contains("            args: PhaseArgs { fraction: 0.25 },\n"));
    assert!(text.contains("            description: \"Phase shift by π/2 on |1⟩ → i|1⟩\",\n"));
    assert_eq!(report.groups()[0].arg_type, "PhaseArgs");
    Ok(())
}

#[test]
fn test_frac_1_sqrt_2_amplitudes() -> Result<(), GenError> {
    let report = render(
        r#"{
        "HADAMARD_TESTS": [{
            "description": "|0⟩ → (|0⟩ + |1⟩)/sqrt(2)",
            "qubits": [0],
            "initial_state": [1, 0],
            "expected_state": [0.7071067811865476, {"re": -0.7071067811865475}]
        }]
    }"#,
    )?;
    assert!(report.text().contains("                Complex64::from(FRAC_1_SQRT_2), // |0⟩\n"));
    assert!(report.text().contains("                Complex64::from(-FRAC_1_SQRT_2), // |1⟩\n"));
    Ok(())
}

#[test]
fn test_kwargs_take_precedence_over_args() -> Result<(), GenError> {
    let report = render(
        r#"{
        "ROTATION_TESTS": [{
            "description": "half turn",
            "qubits": [0],
            "args": {"ignored": 1.0},
            "kwargs": {"theta": 0.5},
            "initial_state": [1, 0],
            "expected_state": [1, 0]
        }]
    }"#,
    )?;
    assert!(report.text().contains("pub(crate) struct RotationArgs {\n    pub(crate) theta: f64,\n}"));
    assert!(!report.text().contains("ignored"));
    Ok(())
}

#[test]
fn test_controls_and_qubit_order_are_kept() -> Result<(), GenError> {
    let report = render(
        r#"{
        "CQFT_TESTS": [{
            "description": "Controlled-QFT",
            "qubits": [2, 0, 1],
            "num_controls": 1,
            "initial_state": [1, 0, 0, 0, 0, 0, 0, 0],
            "expected_state": [1, 0, 0, 0, 0, 0, 0, 0]
        }]
    }"#,
    )?;
    let text = report.text();
    assert!(text.contains("            qubits: vec![2, 0, 1],\n            num_controls: Some(1),\n"));
    assert!(text.contains("                Complex64::ZERO, // |101⟩\n"));
    Ok(())
}

#[test]
fn test_generation_is_deterministic() -> Result<(), GenError> {
    let corpus = Corpus::load(&demo_corpus_path())?;
    let generator = Generator::default();
    let first = generator.render(&corpus)?;
    let second = generator.render(&corpus)?;
    assert_eq!(first.text(), second.text());

    // Re-parsing the same file must not change the output either
    let reloaded = Corpus::load(&demo_corpus_path())?;
    assert_eq!(generator.render(&reloaded)?.text(), first.text());
    Ok(())
}

#[test]
fn test_discovery_completeness() -> Result<(), GenError> {
    let report = render(
        r#"{
        "NOT_TESTS": [{"description": "flip", "qubits": [0], "initial_state": [1, 0], "expected_state": [0, 1]}],
        "SWAP_TESTS": [{"description": "id", "qubits": [0, 1], "initial_state": [1, 0, 0, 0], "expected_state": [1, 0, 0, 0]}],
        "EMPTY_TESTS": [],
        "NOTE_TESTS": "not a sequence",
        "__PRIVATE_TESTS": [{"description": "hidden", "qubits": [0], "initial_state": [1, 0], "expected_state": [1, 0]}],
        "not_tests": [{"description": "wrong case", "qubits": [0], "initial_state": [1, 0], "expected_state": [1, 0]}],
        "FRAC": 0.7071067811865476
    }"#,
    )?;
    let names: Vec<&str> = report.groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["NOT_TESTS", "SWAP_TESTS"]);
    assert_eq!(report.text().matches("pub(crate) static ").count(), 2);
    Ok(())
}

#[test]
fn test_demo_corpus() -> Result<(), GenError> {
    let corpus = Corpus::load(&demo_corpus_path())?;
    let report = Generator::default().render(&corpus)?;

    let names: Vec<&str> = report.groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "CCQFT1_TESTS",
            "CCQFT2_TESTS",
            "CNOT_TESTS",
            "CQFT_TESTS",
            "FREDKIN_TESTS",
            "HADAMARD_TESTS",
            "NOT_TESTS",
            "PHASE_TESTS",
            "QFT_TESTS",
            "SWAP_TESTS",
            "TOFFOLI_TESTS",
        ]
    );
    assert_eq!(report.struct_count(), 1);
    assert_eq!(report.groups().iter().map(|g| g.cases).sum::<usize>(), 34);
    assert!(report.text().contains("args: PhaseArgs { fraction: 0.125 },"));
    assert!(report.text().contains("num_controls: Some(2),"));
    assert!(!report.text().contains("__comment"));
    Ok(())
}

#[test]
fn test_extra_argument_is_dropped_leniently() -> Result<(), GenError> {
    let json = r#"{
        "PHASE_TESTS": [
            {"description": "quarter", "qubits": [0], "args": {"fraction": 0.25},
             "initial_state": [1, 0], "expected_state": [1, 0]},
            {"description": "half with offset", "qubits": [0], "args": {"fraction": 0.5, "offset": 3.0},
             "initial_state": [1, 0], "expected_state": [1, 0]}
        ]
    }"#;
    let report = render(json)?;
    assert!(report.text().contains("args: PhaseArgs { fraction: 0.5 },"));
    assert!(!report.text().contains("offset"));

    let strict = Generator::new(GeneratorConfig::new().with_schema_policy(SchemaPolicy::Strict));
    let err = strict.render(&Corpus::from_json_str(json)?).unwrap_err();
    let (group, cause) = render_cause(err);
    assert_eq!(group, "PHASE_TESTS");
    match cause {
        GenError::SchemaDivergence { index, extra, .. } => {
            assert_eq!(index, 1);
            assert_eq!(extra, vec!["offset".to_string()]);
        }
        other => panic!("Expected SchemaDivergence, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_missing_argument_is_fatal() {
    let err = render(
        r#"{
        "PHASE_TESTS": [
            {"description": "quarter", "qubits": [0], "args": {"fraction": 0.25},
             "initial_state": [1, 0], "expected_state": [1, 0]},
            {"description": "no args", "qubits": [0],
             "initial_state": [1, 0], "expected_state": [1, 0]}
        ]
    }"#,
    )
    .unwrap_err();
    let (_, cause) = render_cause(err);
    assert!(matches!(cause, GenError::MissingArgs { index: 1, .. }));
}

#[test]
fn test_non_power_of_two_vector_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let corpus_path = dir.path().join("vectors.json");
    let output_path = dir.path().join("src").join("tests").join("vectors.rs");
    std::fs::write(
        &corpus_path,
        r#"{
        "A_TESTS": [{"description": "fine", "qubits": [0], "initial_state": [1, 0], "expected_state": [0, 1]}],
        "B_TESTS": [{"description": "three amplitudes", "qubits": [0, 1],
                     "initial_state": [1, 0, 0], "expected_state": [1, 0, 0, 0]}]
    }"#,
    )
    .unwrap();

    let config = GeneratorConfig::new()
        .with_corpus_path(&corpus_path)
        .with_output_path(&output_path)
        .with_formatter(None);
    let err = Generator::new(config).run().unwrap_err();
    assert_eq!(
        err.to_string(),
        "error generating B_TESTS: State vector length 3 is not a power of 2"
    );
    let (_, cause) = render_cause(err);
    assert!(matches!(cause, GenError::InvalidVectorLength { len: 3 }));
    assert!(!output_path.exists(), "No partial file may be written");
}

#[test]
fn test_length_six_vector_is_rejected() {
    let err = render(
        r#"{"X_TESTS": [{"description": "six", "qubits": [0],
            "initial_state": [1, 0], "expected_state": [1, 0, 0, 0, 0, 0]}]}"#,
    )
    .unwrap_err();
    let (_, cause) = render_cause(err);
    assert!(matches!(cause, GenError::InvalidVectorLength { len: 6 }));
}

#[test]
fn test_struct_name_collision() {
    let err = render(
        r#"{
        "CONTROLLED_PHASE_TESTS": [{"description": "a", "qubits": [0], "args": {"fraction": 0.25},
            "initial_state": [1, 0], "expected_state": [1, 0]}],
        "CONTROLLED__PHASE_TESTS": [{"description": "b", "qubits": [0], "args": {"theta": 0.25},
            "initial_state": [1, 0], "expected_state": [1, 0]}]
    }"#,
    )
    .unwrap_err();
    match err {
        GenError::StructNameCollision { struct_name, .. } => {
            assert_eq!(struct_name, "ControlledPhaseArgs")
        }
        other => panic!("Expected StructNameCollision, got {:?}", other),
    }
}

#[test]
fn test_shared_struct_name_is_emitted_once() -> Result<(), GenError> {
    let report = render(
        r#"{
        "CONTROLLED_PHASE_TESTS": [{"description": "a", "qubits": [0], "args": {"fraction": 0.25},
            "initial_state": [1, 0], "expected_state": [1, 0]}],
        "CONTROLLED__PHASE_TESTS": [{"description": "b", "qubits": [0], "args": {"fraction": 0.5},
            "initial_state": [1, 0], "expected_state": [1, 0]}]
    }"#,
    )?;
    assert_eq!(report.text().matches("pub(crate) struct ControlledPhaseArgs").count(), 1);
    assert_eq!(report.struct_count(), 1);
    Ok(())
}

#[test]
fn test_invalid_group_identifier() {
    let err = render(
        r#"{"MY-GATE_TESTS": [{"description": "x", "qubits": [0],
            "initial_state": [1, 0], "expected_state": [1, 0]}]}"#,
    )
    .unwrap_err();
    let (group, cause) = render_cause(err);
    assert_eq!(group, "MY-GATE_TESTS");
    assert!(matches!(cause, GenError::InvalidIdentifier { .. }));
}

#[test]
fn test_keyword_argument_uses_raw_identifier() -> Result<(), GenError> {
    let report = render(
        r#"{"ROT_TESTS": [{"description": "x", "qubits": [0], "args": {"type": 2},
            "initial_state": [1, 0], "expected_state": [1, 0]}]}"#,
    )?;
    assert!(report.text().contains("    pub(crate) r#type: f64,\n"));
    assert!(report.text().contains("args: RotArgs { r#type: 2.0 },"));
    Ok(())
}

#[test]
fn test_malformed_case_reports_position() {
    let err = render(
        r#"{"NOT_TESTS": [
            {"description": "ok", "qubits": [0], "initial_state": [1, 0], "expected_state": [0, 1]},
            {"description": "no states", "qubits": [0]}
        ]}"#,
    )
    .unwrap_err();
    match err {
        GenError::MalformedCase { group, index, .. } => {
            assert_eq!(group, "NOT_TESTS");
            assert_eq!(index, 1);
        }
        other => panic!("Expected MalformedCase, got {:?}", other),
    }
}

#[test]
fn test_non_finite_amplitude_is_rejected() {
    let corpus = Corpus::from_groups([qvgen::TestGroup::new(
        "NAN_TESTS",
        vec![qvgen::TestCase::new(
            "nan",
            vec![0],
            vec![Complex64::new(f64::NAN, 0.0), Complex64::new(0.0, 0.0)],
            vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        )],
    )]);
    let err = Generator::default().render(&corpus).unwrap_err();
    let (group, cause) = render_cause(err);
    assert_eq!(group, "NAN_TESTS");
    assert!(matches!(cause, GenError::NonFiniteAmplitude { index: 0, .. }));
}

#[test]
fn test_infinite_argument_is_rejected() {
    let corpus = Corpus::from_groups([qvgen::TestGroup::new(
        "PHASE_TESTS",
        vec![qvgen::TestCase::new(
            "unbounded",
            vec![0],
            vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        )
        .with_arg("fraction", f64::INFINITY)],
    )]);
    let err = Generator::default().render(&corpus).unwrap_err();
    let (_, cause) = render_cause(err);
    assert!(matches!(cause, GenError::NonFiniteArgument { index: 0, .. }));
}
