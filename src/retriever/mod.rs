// src/retriever/mod.rs
pub mod prospectus;

// Re-export the retrieval pipeline types for convenience
pub use prospectus::{OutputFormat, ProspectusLog, ProspectusRetriever};
