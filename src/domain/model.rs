use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One raw vacancy record exactly as a job board returned it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub data: HashMap<String, serde_json::Value>,
}

impl Listing {
    pub fn from_object(obj: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            data: obj.into_iter().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }
}

/// Salary bounds pulled out of a listing, already filtered by currency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryFields {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub currency: Option<String>,
}

impl SalaryFields {
    pub fn estimate(&self) -> Option<u64> {
        crate::core::salary::estimate(self.lower, self.upper)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub vacancies_found: u64,
    pub vacancies_processed: u64,
    pub average_salary: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    HeadHunter,
    SuperJob,
}

impl SourceKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::HeadHunter => "HeadHunter",
            SourceKind::SuperJob => "SuperJob",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Per-language statistics of one source, in the order languages were queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResultSet {
    pub source: SourceKind,
    pub region_id: u32,
    entries: Vec<(String, LanguageStats)>,
}

impl SourceResultSet {
    pub fn new(source: SourceKind, region_id: u32) -> Self {
        Self {
            source,
            region_id,
            entries: Vec::new(),
        }
    }

    /// Re-inserting a language replaces its stats in place.
    pub fn insert(&mut self, language: impl Into<String>, stats: LanguageStats) {
        let language = language.into();
        match self.entries.iter_mut().find(|(name, _)| *name == language) {
            Some(entry) => entry.1 = stats,
            None => self.entries.push((language, stats)),
        }
    }

    pub fn get(&self, language: &str) -> Option<&LanguageStats> {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, stats)| stats)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.get(language).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageStats)> {
        self.entries.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn languages(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One decoded page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Listing>,
    pub is_last_page: bool,
    pub reported_total: u64,
}

/// Everything needed to issue one GET request against a job board.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl SourceRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub result_sets: Vec<SourceResultSet>,
    /// (source, language) pairs skipped after a network failure.
    pub unavailable: Vec<(SourceKind, String)>,
}

impl RunReport {
    pub fn result_set(&self, source: SourceKind) -> Option<&SourceResultSet> {
        self.result_sets.iter().find(|set| set.source == source)
    }
}
