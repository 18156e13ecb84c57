// Per-file processing: read, repair, parse each document, clean
use crate::data::cleaning::SalesCleaner;
use crate::data::csv_parser::SalesCsvParser;
use crate::data::repair::split_concatenated_documents;
use crate::error::PipelineError;
use crate::storage::SalesFileStore;
use shared::models::{SalesRecord, RAW_HEADER};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub path: PathBuf,
    /// Logical CSV documents found after splitting on repeated headers.
    pub documents: usize,
    pub rows_read: usize,
    pub rows_kept: usize,
}

pub fn handle_process_file<S: SalesFileStore>(
    store: &S,
    cleaner: &SalesCleaner,
    path: &Path,
) -> Result<(Vec<SalesRecord>, FileSummary), PipelineError> {
    let raw = store.read_to_string(path).map_err(|source| PipelineError::ReadError {
        file: path.to_path_buf(),
        source,
    })?;

    let documents = split_concatenated_documents(&raw, RAW_HEADER);
    let mut records = Vec::new();
    let mut rows_read = 0;

    for (idx, document) in documents.iter().enumerate() {
        let document_no = idx + 1;
        let mut rows = SalesCsvParser::parse_document(&document.text).map_err(|source| PipelineError::ParseError {
            file: path.to_path_buf(),
            document: document_no,
            line: document.first_body_line,
            source,
        })?;
        // Report positions as they appear in the file, not in the rebuilt document
        for row in &mut rows {
            row.line = document.file_line(row.line);
        }
        rows_read += rows.len();

        let cleaned = cleaner.clean(path, document_no, rows)?;
        tracing::debug!(file = %path.display(), document = document_no, rows_kept = cleaned.len(), "Cleaned document");
        records.extend(cleaned);
    }

    let summary = FileSummary {
        path: path.to_path_buf(),
        documents: documents.len(),
        rows_read,
        rows_kept: records.len(),
    };
    tracing::info!(
        file = %path.display(),
        documents = summary.documents,
        rows_read = summary.rows_read,
        rows_kept = summary.rows_kept,
        "Processed input file"
    );
    Ok((records, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryFileStore;

    fn cleaner() -> SalesCleaner {
        SalesCleaner::new("pink morsel", "$", "%Y-%m-%d")
    }

    #[test]
    fn test_two_concatenated_documents() {
        let store = InMemoryFileStore::new().with_file(
            "data/a.csv",
            "product,price,quantity,date,region\n\
             Pink Morsel,$3.00,10,2021-01-10,north\n\
             gum,$1.00,3,2021-01-10,north\n\
             product,price,quantity,date,region\n\
             pink morsel,$3.50,5,2021-01-20,east\n\
             pink morsel,$3.50,2,2021-01-21,west\n",
        );

        let (records, summary) = handle_process_file(&store, &cleaner(), Path::new("data/a.csv")).unwrap();

        assert_eq!(summary.documents, 2);
        assert_eq!(summary.rows_read, 4);
        assert_eq!(summary.rows_kept, 3);
        let sales: Vec<f64> = records.iter().map(|r| r.sales).collect();
        assert_eq!(sales, vec![30.0, 17.5, 7.0]);
    }

    #[test]
    fn test_empty_file_yields_nothing() {
        let store = InMemoryFileStore::new().with_file("data/empty.csv", "");
        let (records, summary) = handle_process_file(&store, &cleaner(), Path::new("data/empty.csv")).unwrap();
        assert!(records.is_empty());
        assert_eq!(summary.documents, 0);
    }

    #[test]
    fn test_wrong_column_count_reports_document() {
        let store = InMemoryFileStore::new().with_file(
            "data/a.csv",
            "product,price,quantity,date,region\npink morsel,$3.00,1,2021-01-10,north\n\
             product,price,quantity,date,region\npink morsel,$3.00,1\n",
        );
        let err = handle_process_file(&store, &cleaner(), Path::new("data/a.csv")).unwrap_err();
        match err {
            PipelineError::ParseError { document, line, .. } => {
                assert_eq!(document, 2);
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_conversion_error_reports_file_line() {
        let store = InMemoryFileStore::new().with_file(
            "data/a.csv",
            "product,price,quantity,date,region\npink morsel,$3.00,1,2021-01-10,north\n\
             product,price,quantity,date,region\ngum,$1.00,1,2021-01-10,north\npink morsel,$oops,1,2021-01-11,north\n",
        );
        let err = handle_process_file(&store, &cleaner(), Path::new("data/a.csv")).unwrap_err();
        match err {
            PipelineError::ConversionError { document, line, field, .. } => {
                assert_eq!(document, 2);
                assert_eq!(line, 5);
                assert_eq!(field, "price");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_file_with_byte_order_mark() {
        let store = InMemoryFileStore::new().with_file(
            "data/bom.csv",
            "\u{FEFF}product,price,quantity,date,region\npink morsel,$1.00,2,2021-01-01,north\n",
        );
        let (records, summary) = handle_process_file(&store, &cleaner(), Path::new("data/bom.csv")).unwrap();
        assert_eq!(summary.documents, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sales, 2.0);
    }

    #[test]
    fn test_unreadable_file_is_read_error() {
        let store = InMemoryFileStore::new().with_dir("data");
        let err = handle_process_file(&store, &cleaner(), Path::new("data/gone.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::ReadError { .. }));
    }
}
