// Pipeline configuration
pub mod settings;
