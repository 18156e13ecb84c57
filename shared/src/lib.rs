// Data models shared by the pipeline and the reporting side.
pub mod models;
