// src/lib.rs
pub mod edgar;
pub mod retriever;
pub mod storage;
pub mod utils;

pub use edgar::{Endpoints, FilingMetadata, FilingQuery, ProspectusClient, SeriesResolver};
pub use retriever::{OutputFormat, ProspectusLog, ProspectusRetriever};
pub use storage::StorageManager;
pub use utils::AppError;
