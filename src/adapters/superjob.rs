use crate::adapters::{amount, envelope_array, envelope_bool, envelope_u64, listings_from};
use crate::domain::model::{Listing, Page, SalaryFields, SourceKind, SourceRequest};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::Result;

pub const DEFAULT_ENDPOINT: &str = "https://api.superjob.ru/2.0/vacancies/";
/// Moscow in SuperJob's town numbering.
pub const DEFAULT_TOWN_ID: u32 = 4;
pub const API_KEY_HEADER: &str = "X-Api-App-Id";

/// "Development, programming" catalogue.
const PROGRAMMING_CATALOGUE: u32 = 48;
/// Keyword search restricted to the vacancy title.
const SEARCH_IN_TITLE: u32 = 1;
const RUBLE_CODE: &str = "rub";
const TITLE_PHRASE: &str = "программист";

#[derive(Debug, Clone)]
pub struct SuperJobAdapter {
    endpoint: String,
    api_key: String,
}

impl SuperJobAdapter {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

impl SourceAdapter for SuperJobAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::SuperJob
    }

    fn build_request(&self, language: &str, region_id: u32, page: u32) -> SourceRequest {
        let srws = SEARCH_IN_TITLE.to_string();
        SourceRequest {
            url: self.endpoint.clone(),
            query: vec![
                ("town".to_string(), region_id.to_string()),
                ("catalogues".to_string(), PROGRAMMING_CATALOGUE.to_string()),
                ("keywords[0][keys]".to_string(), TITLE_PHRASE.to_string()),
                ("keywords[0][srws]".to_string(), srws.clone()),
                ("keywords[0][skwc]".to_string(), "and".to_string()),
                ("keywords[1][keys]".to_string(), language.to_string()),
                ("keywords[1][srws]".to_string(), srws),
                ("keywords[1][skwc]".to_string(), "particular".to_string()),
                ("page".to_string(), page.to_string()),
            ],
            headers: vec![(API_KEY_HEADER.to_string(), self.api_key.clone())],
        }
    }

    fn extract_page(&self, raw: serde_json::Value, _page: u32) -> Result<Page> {
        let more = envelope_bool(&raw, "more")?;
        let reported_total = envelope_u64(&raw, "total")?;
        let items = listings_from(envelope_array(&raw, "objects")?);

        Ok(Page {
            items,
            is_last_page: !more,
            reported_total,
        })
    }

    fn salary_fields(&self, listing: &Listing) -> SalaryFields {
        let currency = listing
            .get("currency")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        if currency.as_deref() != Some(RUBLE_CODE) {
            return SalaryFields {
                currency,
                ..SalaryFields::default()
            };
        }

        SalaryFields {
            lower: listing.get("payment_from").and_then(amount),
            upper: listing.get("payment_to").and_then(amount),
            currency,
        }
    }
}
