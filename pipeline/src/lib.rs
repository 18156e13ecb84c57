// Pipeline library root
// Repairs raw sales exports, keeps the target product and writes one consolidated file.

pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod services;
pub mod storage;

pub use error::PipelineError;
