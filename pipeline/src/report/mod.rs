// Reads the consolidated output back and prepares the figures the sales dashboard plots
pub mod daily_sales;

pub use daily_sales::{daily_totals, price_change_summary, DailySales, PeriodTotals, PriceChangeSummary, RegionFilter};

use crate::error::PipelineError;
use csv::ReaderBuilder;
use shared::models::SalesRecord;
use std::path::Path;

/// Parses a file in the output format (`sales,date,region`).
pub fn read_sales_file(file: &Path, text: &str) -> Result<Vec<SalesRecord>, PipelineError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(text.as_bytes());
    rdr.deserialize()
        .collect::<Result<Vec<SalesRecord>, csv::Error>>()
        .map_err(|source| PipelineError::ParseError {
            file: file.to_path_buf(),
            document: 1,
            line: 2,
            source,
        })
}
