// Normalizes parsed rows, keeps the target product, and projects to the output schema
use crate::config::settings::PipelineSettings;
use crate::data::csv_parser::{sales_format, ParsedRow};
use crate::error::{FieldError, PipelineError};
use shared::models::SalesRecord;
use std::path::Path;

pub fn normalize_product(product: &str) -> String {
    product.trim().to_lowercase()
}

pub struct SalesCleaner {
    target_product: String,
    currency_symbol: String,
    date_format: String,
}

impl SalesCleaner {
    pub fn new(target_product: &str, currency_symbol: &str, date_format: &str) -> Self {
        SalesCleaner {
            target_product: normalize_product(target_product),
            currency_symbol: currency_symbol.to_string(),
            date_format: date_format.to_string(),
        }
    }

    pub fn from_settings(settings: &PipelineSettings) -> Self {
        Self::new(&settings.target_product, &settings.currency_symbol, &settings.date_format)
    }

    pub fn target_product(&self) -> &str {
        &self.target_product
    }

    /// Cleans the rows of one document, preserving their order.
    ///
    /// Rows for other products are dropped before any conversion, so only kept
    /// rows can fail. The first failing kept row aborts the whole document.
    pub fn clean(
        &self,
        file: &Path,
        document: usize,
        rows: Vec<ParsedRow>,
    ) -> Result<Vec<SalesRecord>, PipelineError> {
        rows.into_iter()
            .filter(|row| normalize_product(&row.record.product) == self.target_product)
            .map(|row| {
                self.convert(&row).map_err(|e| PipelineError::ConversionError {
                    file: file.to_path_buf(),
                    document,
                    line: row.line,
                    field: e.field,
                    value: e.value,
                    reason: e.reason,
                })
            })
            .collect()
    }

    fn convert(&self, row: &ParsedRow) -> Result<SalesRecord, FieldError> {
        let price = sales_format::parse_price(&row.record.price, &self.currency_symbol)?;
        let quantity = sales_format::parse_quantity(&row.record.quantity)?;
        let date = sales_format::parse_date(&row.record.date, &self.date_format)?;

        Ok(SalesRecord {
            sales: price * quantity as f64,
            date,
            region: row.record.region.trim().to_string(),
        })
    }
}
