// src/retriever/prospectus.rs
use crate::edgar::{FilingMetadata, FilingQuery, ProspectusClient, SeriesResolver};
use crate::storage::StorageManager;
use crate::utils::error::AppError;
use serde::Serialize;

/// Output representation for a retrieved prospectus document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Pdf,
}

impl OutputFormat {
    /// Filename suffix enforced at save time.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => ".htm",
            OutputFormat::Pdf => ".pdf",
        }
    }
}

/// Per-fund result record, the sole durable output of a retrieval run.
///
/// A saved entry carries no error; a failed entry always carries one.
/// `url` and `date` are `None` only when the failure predates the filing
/// lookup; once known they stay populated even if a later stage fails.
#[derive(Debug, Clone, Serialize)]
pub struct ProspectusLog {
    pub fund_symbol: String,
    pub is_successfully_saved: bool,
    pub error: Option<String>,
    pub url: Option<String>,
    pub date: Option<String>,
}

impl ProspectusLog {
    fn saved(fund_symbol: &str, filing: &FilingMetadata) -> Self {
        Self {
            fund_symbol: fund_symbol.to_string(),
            is_successfully_saved: true,
            error: None,
            url: Some(filing.html_url.clone()),
            date: Some(filing.accepted_at.clone()),
        }
    }

    /// Failure before the filing lookup produced anything.
    fn failed(fund_symbol: &str, error: String) -> Self {
        Self {
            fund_symbol: fund_symbol.to_string(),
            is_successfully_saved: false,
            error: Some(error),
            url: None,
            date: None,
        }
    }

    /// Failure after a successful lookup: the filing link and date are
    /// already known and stay in the entry.
    fn failed_after_query(fund_symbol: &str, filing: &FilingMetadata, error: String) -> Self {
        Self {
            fund_symbol: fund_symbol.to_string(),
            is_successfully_saved: false,
            error: Some(error),
            url: Some(filing.html_url.clone()),
            date: Some(filing.accepted_at.clone()),
        }
    }
}

/// Sequences resolver -> filing search -> document fetch -> file sink for
/// one fund at a time, converting every stage failure into a log entry
/// instead of propagating it.
pub struct ProspectusRetriever {
    resolver: SeriesResolver,
    client: ProspectusClient,
    storage: StorageManager,
}

impl ProspectusRetriever {
    pub fn new(resolver: SeriesResolver, client: ProspectusClient, storage: StorageManager) -> Self {
        Self {
            resolver,
            client,
            storage,
        }
    }

    /// Replaces the API credential on the underlying client.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.client.set_api_key(api_key);
    }

    pub fn storage(&self) -> &StorageManager {
        &self.storage
    }

    /// Two-tier lookup policy: series-scoped search when the symbol maps
    /// to a known series id, ticker-scoped search otherwise. A resolver
    /// miss is recovered here and never reaches the caller.
    fn query_for(&self, fund_symbol: &str) -> FilingQuery {
        if let Ok(series_id) = self.resolver.resolve(fund_symbol) {
            FilingQuery::Series(series_id.to_string())
        } else {
            FilingQuery::Ticker(fund_symbol.to_string())
        }
    }

    /// Retrieves the latest prospectus for `fund_symbol` and saves it under
    /// `file_name` in the requested format.
    pub async fn retrieve(
        &self,
        fund_symbol: &str,
        file_name: &str,
        format: OutputFormat,
    ) -> ProspectusLog {
        tracing::info!("Processing fund: {}", fund_symbol);

        let query = self.query_for(fund_symbol);
        let filing = match self.client.latest_filing(&query).await {
            Ok(filing) => filing,
            Err(e) => {
                tracing::error!("An error occurred during retrieval: {}", e);
                return ProspectusLog::failed(fund_symbol, e.to_string());
            }
        };

        tracing::info!(
            "Fund: {} | Accepted: {} | Link: {}",
            fund_symbol,
            filing.accepted_at,
            filing.detail_url
        );

        tracing::info!("Downloading fund: {}", fund_symbol);
        let fetched = match format {
            OutputFormat::Html => self.client.fetch_html(&filing).await,
            OutputFormat::Pdf => self.client.fetch_pdf(&filing).await,
        };
        let bytes = match fetched {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("An error occurred while downloading data: {}", e);
                return ProspectusLog::failed_after_query(fund_symbol, &filing, e.to_string());
            }
        };

        match self
            .storage
            .save_document(file_name, format.extension(), &bytes)
        {
            Ok(path) => {
                tracing::info!("Saved prospectus for {} to {}", fund_symbol, path.display());
                ProspectusLog::saved(fund_symbol, &filing)
            }
            Err(e) => {
                tracing::error!("An error occurred while saving data: {}", e);
                ProspectusLog::failed_after_query(fund_symbol, &filing, e.to_string())
            }
        }
    }

    /// Retrieves a batch sequentially, in input order. When `file_names`
    /// is omitted each fund saves to `<symbol><extension>`. A supplied
    /// list must match `fund_symbols` in length; a mismatch is rejected
    /// before any network activity. One fund's failure never aborts the
    /// rest of the batch.
    pub async fn retrieve_many(
        &self,
        fund_symbols: &[String],
        file_names: Option<&[String]>,
        format: OutputFormat,
    ) -> Result<Vec<ProspectusLog>, AppError> {
        let file_names: Vec<String> = match file_names {
            Some(names) if names.len() != fund_symbols.len() => {
                return Err(AppError::LengthMismatch {
                    symbols: fund_symbols.len(),
                    files: names.len(),
                });
            }
            Some(names) => names.to_vec(),
            None => fund_symbols
                .iter()
                .map(|symbol| format!("{}{}", symbol, format.extension()))
                .collect(),
        };

        let mut logs = Vec::with_capacity(fund_symbols.len());
        for (fund_symbol, file_name) in fund_symbols.iter().zip(&file_names) {
            logs.push(self.retrieve(fund_symbol, file_name, format).await);
        }

        let failures = logs.iter().filter(|l| !l.is_successfully_saved).count();
        tracing::info!(
            "Batch finished. Success: {}, Failures: {}",
            logs.len() - failures,
            failures
        );

        Ok(logs)
    }
}
