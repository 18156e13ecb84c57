use csv::{ReaderBuilder, StringRecord};
use shared::models::RawSalesRecord;

// Field conversions for the raw export format: "$3.00" prices, integer quantities, ISO dates
pub mod sales_format {
    use crate::error::FieldError;
    use chrono::NaiveDate;
    use std::str::FromStr;

    // Parses "$3.50" (or "3.50") into 3.5. Only one leading currency symbol is stripped.
    pub fn parse_price(s: &str, currency_symbol: &str) -> Result<f64, FieldError> {
        let trimmed = s.trim();
        let amount = trimmed.strip_prefix(currency_symbol).unwrap_or(trimmed).trim();

        let price = f64::from_str(amount).map_err(|e| FieldError::new("price", s, e))?;
        if !price.is_finite() {
            return Err(FieldError::new("price", s, "not a finite number"));
        }
        Ok(price)
    }

    pub fn parse_quantity(s: &str) -> Result<i64, FieldError> {
        i64::from_str(s.trim()).map_err(|e| FieldError::new("quantity", s, e))
    }

    pub fn parse_date(s: &str, format: &str) -> Result<NaiveDate, FieldError> {
        NaiveDate::parse_from_str(s.trim(), format).map_err(|e| FieldError::new("date", s, e))
    }

}

/// A raw record together with the line it came from inside its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub line: u64,
    pub record: RawSalesRecord,
}

pub struct SalesCsvParser;

impl SalesCsvParser {
    // CSV Header: product,price,quantity,date,region
    // Example Row: Pink Morsel,$3.00,10,2021-01-10,north
    pub fn parse_document(document: &str) -> Result<Vec<ParsedRow>, csv::Error> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(document.as_bytes());

        let headers: StringRecord = rdr.headers()?.clone();
        let mut rows = Vec::new();

        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let raw: RawSalesRecord = record.deserialize(Some(&headers))?;
            rows.push(ParsedRow { line, record: raw });
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::RAW_HEADER;

    #[test]
    fn test_parse_document_valid_data() {
        let document = format!(
            "{}\nPink Morsel,$3.00,10,2021-01-10,north\ngum,$1.00,2,2021-01-11,south",
            RAW_HEADER
        );
        let rows = SalesCsvParser::parse_document(&document).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].record.product, "Pink Morsel");
        assert_eq!(rows[0].record.price, "$3.00");
        assert_eq!(rows[0].record.quantity, "10");
        assert_eq!(rows[0].record.date, "2021-01-10");
        assert_eq!(rows[0].record.region, "north");
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[1].record.product, "gum");
    }

    #[test]
    fn test_parse_document_header_only() {
        let rows = SalesCsvParser::parse_document(RAW_HEADER).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_document_wrong_column_count() {
        let document = format!("{}\npink morsel,$3.00,10,2021-01-10", RAW_HEADER);
        let result = SalesCsvParser::parse_document(&document);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_document_quoted_fields() {
        let document = format!("{}\n\"pink morsel\",\"$3.00\",10,2021-01-10,north", RAW_HEADER);
        let rows = SalesCsvParser::parse_document(&document).unwrap();
        assert_eq!(rows[0].record.product, "pink morsel");
    }
}
