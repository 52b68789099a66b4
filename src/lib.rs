pub mod cli;
pub mod error;
pub mod ingest;
pub mod model;
pub mod report;
pub mod rounding;
pub mod summary;
