// src/edgar/resolver.rs
use crate::edgar::models::MutualFundTickers;
use crate::utils::error::{AppError, EdgarError};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Immutable symbol -> series-id table keyed from the SEC mutual fund
/// ticker mapping. Built once before any retrieval begins and never
/// mutated afterward; a missing or malformed mapping file is fatal here,
/// unlike a per-fund lookup miss.
pub struct SeriesResolver {
    symbol_to_series: HashMap<String, String>,
}

impl SeriesResolver {
    /// Loads the mapping file wholesale and keys it by symbol.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let mapping: MutualFundTickers = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!(
                "invalid ticker mapping file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut symbol_to_series = HashMap::with_capacity(mapping.data.len());
        for record in mapping.data {
            symbol_to_series.insert(record.3, record.1);
        }

        tracing::info!(
            "Loaded {} symbol -> series mappings from {}",
            symbol_to_series.len(),
            path.display()
        );

        Ok(Self { symbol_to_series })
    }

    /// Builds the table from already-keyed (symbol, series id) pairs.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            symbol_to_series: records.into_iter().collect(),
        }
    }

    /// Pure lookup. Case-sensitive; symbols are normalized by the caller.
    pub fn resolve(&self, symbol: &str) -> Result<&str, EdgarError> {
        self.symbol_to_series
            .get(symbol)
            .map(String::as_str)
            .ok_or_else(|| EdgarError::SymbolNotFound(symbol.to_string()))
    }

    pub fn len(&self) -> usize {
        self.symbol_to_series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_to_series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn resolver_with(pairs: &[(&str, &str)]) -> SeriesResolver {
        SeriesResolver::from_records(
            pairs
                .iter()
                .map(|(s, id)| (s.to_string(), id.to_string())),
        )
    }

    #[test]
    fn resolves_known_symbol() {
        let resolver = resolver_with(&[("SPY", "S000006408"), ("IMSXX", "S000009184")]);
        assert_eq!(resolver.resolve("SPY").unwrap(), "S000006408");
    }

    #[test]
    fn unknown_symbol_is_a_typed_miss() {
        let resolver = resolver_with(&[("SPY", "S000006408")]);
        match resolver.resolve("QQQ") {
            Err(EdgarError::SymbolNotFound(symbol)) => assert_eq!(symbol, "QQQ"),
            other => panic!("expected SymbolNotFound, got {other:?}"),
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let resolver = resolver_with(&[("SPY", "S000006408")]);
        assert!(resolver.resolve("spy").is_err());
    }

    #[test]
    fn loads_mapping_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"fields":["cik","seriesId","classId","symbol"],
                "data":[[884394,"S000006408","C000017618","SPY"],
                        [1002427,"S000009184","C000024954","IMSXX"]]}}"#
        )
        .unwrap();

        let resolver = SeriesResolver::from_file(file.path()).unwrap();
        assert_eq!(resolver.len(), 2);
        assert_eq!(resolver.resolve("IMSXX").unwrap(), "S000009184");
    }

    #[test]
    fn malformed_mapping_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"data": "not an array"}}"#).unwrap();

        match SeriesResolver::from_file(file.path()) {
            Err(AppError::Config(_)) => {}
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn missing_mapping_file_is_an_io_error() {
        match SeriesResolver::from_file("/nonexistent/company_tickers_mf.json") {
            Err(AppError::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
