pub mod cli;
pub mod cobertura;
pub mod error;
pub mod ingest;
pub mod merge;
pub mod metrics;
pub mod model;
pub mod summary;
