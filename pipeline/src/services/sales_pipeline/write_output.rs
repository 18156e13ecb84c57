// Output serialization and the single atomic write at the end of a run
use crate::error::PipelineError;
use crate::storage::SalesFileStore;
use csv::WriterBuilder;
use shared::models::{SalesRecord, SALES_HEADER};
use std::path::Path;

/// Renders `sales,date,region` plus one line per record. The header is written
/// explicitly so an empty run still produces a valid file.
pub fn render_output(records: &[SalesRecord]) -> Result<Vec<u8>, PipelineError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    wtr.write_record(SALES_HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(bytes)
}

pub fn handle_write_output<S: SalesFileStore>(
    store: &S,
    output_file: &Path,
    records: &[SalesRecord],
) -> Result<(), PipelineError> {
    let bytes = render_output(records)?;
    store
        .write_atomic(output_file, &bytes)
        .map_err(|source| PipelineError::WriteError {
            file: output_file.to_path_buf(),
            source,
        })?;
    tracing::info!(output = %output_file.display(), rows = records.len(), "Wrote consolidated output");
    Ok(())
}
