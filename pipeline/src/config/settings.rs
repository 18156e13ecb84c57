// Pipeline settings, loaded from an optional JSON file and overridden from the command line
use crate::error::PipelineError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    /// Directory scanned for raw exports.
    pub input_dir: PathBuf,
    /// Consolidated output; never treated as an input even when it lives in `input_dir`.
    pub output_file: PathBuf,
    pub target_product: String,
    pub currency_symbol: String,
    /// Extension (without the dot) of files picked up as inputs, matched case-insensitively.
    pub input_extension: String,
    /// chrono format string for the `date` column.
    pub date_format: String,
    pub price_increase_date: NaiveDate,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            input_dir: PathBuf::from("data"),
            output_file: PathBuf::from("data/final_output.csv"),
            target_product: "pink morsel".to_string(),
            currency_symbol: "$".to_string(),
            input_extension: "csv".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            price_increase_date: NaiveDate::from_ymd_opt(2021, 1, 15).unwrap_or_default(),
        }
    }
}

impl PipelineSettings {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let settings: PipelineSettings = serde_json::from_str(json)
            .map_err(|e| PipelineError::ConfigError(format!("invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, PipelineError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.target_product.trim().is_empty() {
            return Err(PipelineError::ConfigError("target_product must not be empty".to_string()));
        }
        if self.input_extension.trim_start_matches('.').is_empty() {
            return Err(PipelineError::ConfigError("input_extension must not be empty".to_string()));
        }
        if self.output_file.file_name().is_none() {
            return Err(PipelineError::ConfigError(format!(
                "output_file '{}' does not name a file",
                self.output_file.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_layout() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.input_dir, PathBuf::from("data"));
        assert_eq!(settings.output_file, PathBuf::from("data/final_output.csv"));
        assert_eq!(settings.target_product, "pink morsel");
        assert_eq!(settings.price_increase_date, NaiveDate::from_ymd_opt(2021, 1, 15).unwrap());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_bundled_default_json_matches_defaults() {
        let settings = PipelineSettings::from_json_str(include_str!("../../config/default.json")).unwrap();
        assert_eq!(settings, PipelineSettings::default());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings = PipelineSettings::from_json_str(
            r#"{ "input_dir": "exports", "price_increase_date": "2022-03-01" }"#,
        )
        .unwrap();
        assert_eq!(settings.input_dir, PathBuf::from("exports"));
        assert_eq!(settings.output_file, PathBuf::from("data/final_output.csv"));
        assert_eq!(settings.price_increase_date, NaiveDate::from_ymd_opt(2022, 3, 1).unwrap());
    }

    #[test]
    fn test_empty_target_product_rejected() {
        let result = PipelineSettings::from_json_str(r#"{ "target_product": "   " }"#);
        assert!(matches!(result, Err(PipelineError::ConfigError(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = PipelineSettings::from_json_str("{ not json");
        assert!(result.unwrap_err().to_string().contains("invalid settings JSON"));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "target_product": "Blue Morsel" }}"#).unwrap();
        let settings = PipelineSettings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.target_product, "Blue Morsel");
    }
}
