// pipeline/src/services/sales_pipeline/mod.rs
// Holds SalesPipeline and drives one run: discover, process every file, write once.
use crate::config::settings::PipelineSettings;
use crate::data::cleaning::SalesCleaner;
use crate::error::PipelineError;
use crate::storage::SalesFileStore;
use shared::models::SalesRecord;
use std::path::PathBuf;

pub mod discover_inputs;
pub mod process_file;
pub mod write_output;

pub use process_file::FileSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub output_file: PathBuf,
    pub files: Vec<FileSummary>,
    pub rows_written: usize,
}

pub struct SalesPipeline<S: SalesFileStore> {
    store: S,
    settings: PipelineSettings,
    cleaner: SalesCleaner,
}

impl<S: SalesFileStore> SalesPipeline<S> {
    pub fn new(store: S, settings: PipelineSettings) -> Result<Self, PipelineError> {
        settings.validate()?;
        let cleaner = SalesCleaner::from_settings(&settings);
        Ok(SalesPipeline { store, settings, cleaner })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Runs the whole batch. The output file is only touched after every input
    /// has been read, repaired, parsed and cleaned; any error leaves it as it was.
    pub fn run(&self) -> Result<PipelineReport, PipelineError> {
        tracing::info!(
            input_dir = %self.settings.input_dir.display(),
            product = %self.cleaner.target_product(),
            "Starting sales pipeline run"
        );

        let inputs = discover_inputs::handle_discover_inputs(&self.store, &self.settings)?;
        if inputs.is_empty() {
            tracing::warn!(
                input_dir = %self.settings.input_dir.display(),
                "No input files found, output will only contain the header"
            );
        } else {
            tracing::info!(count = inputs.len(), "Found input files");
        }

        let mut records: Vec<SalesRecord> = Vec::new();
        let mut files = Vec::with_capacity(inputs.len());
        for path in &inputs {
            let (cleaned, summary) = process_file::handle_process_file(&self.store, &self.cleaner, path)?;
            records.extend(cleaned);
            files.push(summary);
        }

        write_output::handle_write_output(&self.store, &self.settings.output_file, &records)?;

        Ok(PipelineReport {
            output_file: self.settings.output_file.clone(),
            files,
            rows_written: records.len(),
        })
    }
}
