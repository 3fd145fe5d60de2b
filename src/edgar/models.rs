// src/edgar/models.rs
#![allow(non_snake_case)]
use crate::utils::error::EdgarError;
use serde::{Deserialize, Serialize};

/// Prefix every EDGAR filing detail link shares; the remainder is the
/// document's path under the archive mirror.
pub const EDGAR_ARCHIVE_PREFIX: &str = "https://www.sec.gov/Archives/edgar/data/";

/// Which identifier a filing search is scoped to.
///
/// Series-scoped searches target the short-form annual update (497K);
/// ticker-scoped searches target the full prospectus form (497) and are the
/// fallback when a symbol has no known series id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilingQuery {
    Series(String),
    Ticker(String),
}

impl FilingQuery {
    /// Renders the free-text filter string the search endpoint expects.
    pub fn query_string(&self) -> String {
        match self {
            FilingQuery::Series(series_id) => format!(
                "formType:\"497K\" AND seriesAndClassesContractsInformation.series:{series_id}"
            ),
            FilingQuery::Ticker(ticker) => format!("formType:\"497\" AND ticker:({ticker})"),
        }
    }

    /// Human-readable scope, used when a search comes back empty.
    pub fn describe(&self) -> String {
        match self {
            FilingQuery::Series(series_id) => format!("series {series_id}"),
            FilingQuery::Ticker(ticker) => format!("ticker {ticker}"),
        }
    }
}

/// Structure representing a response from the filings search endpoint.
/// Only the fields the pipeline consumes are modeled; the API returns more.
#[derive(Debug, Deserialize)]
pub struct FilingSearchResponse {
    #[serde(default)]
    pub filings: Vec<FilingRecord>,
}

#[derive(Debug, Deserialize)]
pub struct FilingRecord {
    pub linkToFilingDetails: String,
    pub linkToHtml: String,
    pub filedAt: String,
}

/// The SEC mutual fund ticker mapping file (`company_tickers_mf.json`).
/// Shape: `{"fields": ["cik","seriesId","classId","symbol"], "data": [...]}`
/// where each data row is a 4-tuple.
#[derive(Debug, Deserialize)]
pub struct MutualFundTickers {
    #[serde(default)]
    pub fields: Vec<String>,
    pub data: Vec<MutualFundTickerRecord>,
}

#[derive(Debug, Deserialize)]
pub struct MutualFundTickerRecord(pub u64, pub String, pub String, pub String);

impl MutualFundTickerRecord {
    pub fn cik(&self) -> u64 {
        self.0
    }

    pub fn series_id(&self) -> &str {
        &self.1
    }

    pub fn class_id(&self) -> &str {
        &self.2
    }

    pub fn symbol(&self) -> &str {
        &self.3
    }
}

/// Simple struct representing the filing selected for a fund.
/// Produced by one search, consumed immediately by the fetch stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingMetadata {
    /// Canonical filing index page (also called the filing detail page).
    pub detail_url: String,
    /// Rendered-HTML link reported alongside the filing.
    pub html_url: String,
    /// Acceptance timestamp in ISO-8601, as reported by EDGAR.
    pub accepted_at: String,
}

impl FilingMetadata {
    /// Derives the path under the archive mirror by stripping the EDGAR
    /// data prefix from the detail-page link.
    pub fn archive_path(&self) -> Result<&str, EdgarError> {
        self.detail_url
            .strip_prefix(EDGAR_ARCHIVE_PREFIX)
            .ok_or_else(|| {
                EdgarError::Parse(format!(
                    "detail link does not point at the EDGAR archive: {}",
                    self.detail_url
                ))
            })
    }
}

impl From<FilingRecord> for FilingMetadata {
    fn from(record: FilingRecord) -> Self {
        Self {
            detail_url: record.linkToFilingDetails,
            html_url: record.linkToHtml,
            accepted_at: record.filedAt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_query_targets_497k() {
        let query = FilingQuery::Series("S000009184".to_string());
        assert_eq!(
            query.query_string(),
            "formType:\"497K\" AND seriesAndClassesContractsInformation.series:S000009184"
        );
    }

    #[test]
    fn ticker_query_targets_full_497() {
        let query = FilingQuery::Ticker("SPY".to_string());
        assert_eq!(query.query_string(), "formType:\"497\" AND ticker:(SPY)");
    }

    #[test]
    fn archive_path_strips_edgar_prefix() {
        let filing = FilingMetadata {
            detail_url: format!("{EDGAR_ARCHIVE_PREFIX}884394/000119312524054321/0001193125-24-054321-index.htm"),
            html_url: "https://www.sec.gov/cgi-bin/browse-edgar".to_string(),
            accepted_at: "2024-02-28T17:02:11-05:00".to_string(),
        };
        assert_eq!(
            filing.archive_path().unwrap(),
            "884394/000119312524054321/0001193125-24-054321-index.htm"
        );
    }

    #[test]
    fn archive_path_rejects_foreign_links() {
        let filing = FilingMetadata {
            detail_url: "https://example.com/not-edgar/doc.htm".to_string(),
            html_url: String::new(),
            accepted_at: String::new(),
        };
        assert!(matches!(filing.archive_path(), Err(EdgarError::Parse(_))));
    }

    #[test]
    fn search_response_deserializes_top_filing() {
        let raw = r#"{
            "total": { "value": 7, "relation": "eq" },
            "filings": [
                {
                    "linkToFilingDetails": "https://www.sec.gov/Archives/edgar/data/884394/000119312524054321/index.htm",
                    "linkToHtml": "https://www.sec.gov/Archives/edgar/data/884394/000119312524054321/doc.htm",
                    "filedAt": "2024-02-28T17:02:11-05:00",
                    "formType": "497K"
                }
            ]
        }"#;
        let parsed: FilingSearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.filings.len(), 1);
        assert_eq!(parsed.filings[0].filedAt, "2024-02-28T17:02:11-05:00");
    }

    #[test]
    fn search_response_tolerates_missing_filings_array() {
        let parsed: FilingSearchResponse =
            serde_json::from_str(r#"{"total": {"value": 0}}"#).unwrap();
        assert!(parsed.filings.is_empty());
    }

    #[test]
    fn mapping_file_rows_deserialize_as_tuples() {
        let raw = r#"{
            "fields": ["cik", "seriesId", "classId", "symbol"],
            "data": [
                [884394, "S000006408", "C000017618", "SPY"],
                [1002427, "S000009184", "C000024954", "IMSXX"]
            ]
        }"#;
        let parsed: MutualFundTickers = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.data[0].symbol(), "SPY");
        assert_eq!(parsed.data[0].series_id(), "S000006408");
        assert_eq!(parsed.data[1].cik(), 1002427);
        assert_eq!(parsed.data[1].class_id(), "C000024954");
    }
}
