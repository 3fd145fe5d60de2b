// src/edgar/client.rs
use crate::edgar::models::{FilingMetadata, FilingQuery, FilingSearchResponse};
use crate::utils::error::EdgarError;
use reqwest::header;
use serde_json::json;

/// Base URLs for the filings search API and its two document endpoints.
/// Defaults target the production sec-api.io services; tests point these at
/// a local mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub search_url: String,
    pub archive_base_url: String,
    pub pdf_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search_url: "https://api.sec-api.io".to_string(),
            archive_base_url: "https://archive.sec-api.io".to_string(),
            pdf_url: "https://api.sec-api.io/filing-reader".to_string(),
        }
    }
}

/// Client for the filings search API: finds the most recent prospectus
/// filing for a query scope and downloads the document in either of its
/// two representations (archived HTML, converted PDF).
pub struct ProspectusClient {
    http: reqwest::Client,
    api_key: String,
    endpoints: Endpoints,
}

impl ProspectusClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, EdgarError> {
        Self::with_endpoints(api_key, Endpoints::default())
    }

    pub fn with_endpoints(
        api_key: impl Into<String>,
        endpoints: Endpoints,
    ) -> Result<Self, EdgarError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            endpoints,
        })
    }

    /// Replaces the API credential used for subsequent requests.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Returns the single most recent filing matching `query`, sorted by
    /// acceptance time descending.
    pub async fn latest_filing(&self, query: &FilingQuery) -> Result<FilingMetadata, EdgarError> {
        let payload = json!({
            "query": query.query_string(),
            "from": 0,
            "size": 1,
            "sort": [{ "filedAt": { "order": "desc" } }],
        });

        tracing::debug!("Searching filings with query: {}", query.query_string());

        let response = self
            .http
            .post(&self.endpoints.search_url)
            .header(header::AUTHORIZATION, &self.api_key)
            .json(&payload)
            .send()
            .await?; // Propagates reqwest::Error as EdgarError::Network

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Filing search returned HTTP {} for {}", status, query.describe());
            return Err(EdgarError::Query(status));
        }

        let body: FilingSearchResponse = response
            .json()
            .await
            .map_err(|e| EdgarError::Parse(e.to_string()))?;

        // Zero filings is a distinct condition from a transport failure:
        // the query itself succeeded, it just matched nothing.
        let top = body
            .filings
            .into_iter()
            .next()
            .ok_or_else(|| EdgarError::EmptyResult(query.describe()))?;

        tracing::debug!(
            "Top filing accepted at {}: {}",
            top.filedAt,
            top.linkToFilingDetails
        );

        Ok(FilingMetadata::from(top))
    }

    /// Downloads the filing document from the archive mirror, addressed by
    /// the path derived from the detail-page link.
    pub async fn fetch_html(&self, filing: &FilingMetadata) -> Result<Vec<u8>, EdgarError> {
        let archive_path = filing.archive_path()?;
        let url = format!("{}/{}", self.endpoints.archive_base_url, archive_path);

        tracing::info!("Downloading document from: {}", url);

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, &self.api_key)
            .header(header::CONTENT_TYPE, "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(EdgarError::Download(status));
        }

        let bytes = response.bytes().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }

    /// Renders the filing as PDF via the conversion endpoint; the source
    /// link and credential travel as query parameters.
    pub async fn fetch_pdf(&self, filing: &FilingMetadata) -> Result<Vec<u8>, EdgarError> {
        tracing::info!("Requesting PDF conversion for: {}", filing.detail_url);

        let response = self
            .http
            .get(&self.endpoints.pdf_url)
            .query(&[
                ("url", filing.detail_url.as_str()),
                ("token", self.api_key.as_str()),
            ])
            .header(header::CONTENT_TYPE, "application/pdf")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                "HTTP error status: {} converting {}",
                status,
                filing.detail_url
            );
            return Err(EdgarError::Download(status));
        }

        let bytes = response.bytes().await?;
        tracing::debug!(
            "Successfully downloaded {} bytes of PDF for {}",
            bytes.len(),
            filing.detail_url
        );
        Ok(bytes.to_vec())
    }
}
