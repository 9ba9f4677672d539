pub mod config;
pub mod metrics;
pub mod records;
pub mod report;
pub mod scoring;
