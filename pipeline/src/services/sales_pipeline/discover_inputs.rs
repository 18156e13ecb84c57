// Input discovery: which files in the input directory are raw exports
use crate::config::settings::PipelineSettings;
use crate::error::PipelineError;
use crate::storage::SalesFileStore;
use std::path::{Path, PathBuf};

pub fn handle_discover_inputs<S: SalesFileStore>(
    store: &S,
    settings: &PipelineSettings,
) -> Result<Vec<PathBuf>, PipelineError> {
    let entries = store
        .list_dir(&settings.input_dir)
        .map_err(|source| PipelineError::DiscoveryError {
            dir: settings.input_dir.clone(),
            source,
        })?;

    let extension = settings.input_extension.trim_start_matches('.');
    // Compared resolved so `data/x.csv`, `./data/x.csv` and `/abs/data/x.csv` match
    let output = store.resolve(&settings.output_file);
    let mut inputs: Vec<PathBuf> = entries
        .into_iter()
        .filter(|path| has_extension(path, extension))
        .filter(|path| store.resolve(path) != output)
        .collect();

    // Directory listings come back in arbitrary order
    inputs.sort();
    Ok(inputs)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case(extension))
}
