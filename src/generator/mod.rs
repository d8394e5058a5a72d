// src/generator/mod.rs

//! Runs the generation pipeline end to end.
//!
//! A run is a strictly sequential batch: load the corpus, discover groups,
//! infer argument schemas, render every group into one in-memory text, and
//! only then hand the text to the [`OutputManager`]. A failure at any stage
//! aborts the run before the output file is touched, except for formatter
//! failures, which leave the unformatted file on disk.

mod report;

pub use report::{GenerationReport, GroupSummary};

use tracing::debug;

use crate::config::{GeneratorConfig, OutputTarget};
use crate::core::Result;
use crate::corpus::Corpus;
use crate::emitter::CodeEmitter;
use crate::inference::infer_schemas;
use crate::output::OutputManager;

/// Entry point tying the corpus, inference, emission and output together.
///
/// The generator holds no state between runs: every call threads a fresh
/// schema table from inference into emission.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator for `config`.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The configuration this generator runs with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Renders `corpus` to source text without touching the filesystem.
    ///
    /// # Arguments
    /// * `corpus` - The registry to generate from.
    ///
    /// # Returns
    /// * `Ok(GenerationReport)` carrying the text and per-group summaries.
    /// * `Err(GenError)` for malformed cases, schema violations, invalid
    ///   vectors or identifiers.
    pub fn render(&self, corpus: &Corpus) -> Result<GenerationReport> {
        let suffix = self.config.suffix();
        let groups = corpus.discover(suffix)?;
        debug!(
            entries = corpus.entry_count(),
            groups = groups.len(),
            "discovered test groups"
        );

        let schemas = infer_schemas(&groups, suffix);
        let emitter = CodeEmitter::new(&schemas)
            .with_canonicalizer(*self.config.canonicalizer())
            .with_policy(self.config.schema_policy());
        let text = emitter.emit(&groups)?;

        let summaries = groups
            .iter()
            .map(|group| GroupSummary {
                name: group.name().to_string(),
                arg_type: schemas.arg_type(group.name()).to_string(),
                cases: group.len(),
            })
            .collect();
        let struct_count = schemas.distinct_structs()?.len();
        Ok(GenerationReport::new(summaries, struct_count, text))
    }

    /// Renders `corpus` and materializes the result as configured.
    ///
    /// With [`OutputTarget::Stdout`] the text is only returned; otherwise it
    /// is written, rotated and formatted by an [`OutputManager`].
    pub fn generate(&self, corpus: &Corpus) -> Result<GenerationReport> {
        let report = self.render(corpus)?;
        match self.config.output() {
            OutputTarget::Stdout => Ok(report),
            OutputTarget::File(path) => {
                let manager = OutputManager::new(path)
                    .with_backup(self.config.backup())
                    .with_formatter(self.config.formatter().cloned());
                let output = manager.materialize(report.text())?;
                Ok(report.with_output(output))
            }
        }
    }

    /// Loads the configured corpus file and generates from it.
    ///
    /// # Errors
    /// * `GenError::CorpusIo` / `GenError::CorpusParse` / `GenError::CorpusShape`
    ///   before anything is written.
    /// * Any error from [`Generator::generate`].
    pub fn run(&self) -> Result<GenerationReport> {
        let corpus = Corpus::load(self.config.corpus_path())?;
        self.generate(&corpus)
    }
}
