use crate::adapters::{amount, envelope_array, envelope_u64, listings_from};
use crate::domain::model::{Listing, Page, SalaryFields, SourceKind, SourceRequest};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::Result;

pub const DEFAULT_ENDPOINT: &str = "https://api.hh.ru/vacancies/";
/// Moscow in HeadHunter's area numbering.
pub const DEFAULT_AREA_ID: u32 = 1;

const RUBLE_CODE: &str = "RUR";
const TITLE_PHRASE: &str = "программист";

#[derive(Debug, Clone)]
pub struct HeadHunterAdapter {
    endpoint: String,
}

impl HeadHunterAdapter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HeadHunterAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl SourceAdapter for HeadHunterAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::HeadHunter
    }

    fn build_request(&self, language: &str, region_id: u32, page: u32) -> SourceRequest {
        SourceRequest {
            url: self.endpoint.clone(),
            query: vec![
                ("text".to_string(), format!("{} {}", TITLE_PHRASE, language)),
                ("search_field".to_string(), "name".to_string()),
                ("area".to_string(), region_id.to_string()),
                ("page".to_string(), page.to_string()),
            ],
            headers: Vec::new(),
        }
    }

    fn extract_page(&self, raw: serde_json::Value, page: u32) -> Result<Page> {
        let pages = envelope_u64(&raw, "pages")?;
        let reported_total = envelope_u64(&raw, "found")?;
        let items = listings_from(envelope_array(&raw, "items")?);

        Ok(Page {
            items,
            // `pages == 0` means an empty result, which is also the last page
            is_last_page: u64::from(page) + 1 >= pages,
            reported_total,
        })
    }

    fn salary_fields(&self, listing: &Listing) -> SalaryFields {
        let Some(salary) = listing.get("salary").and_then(|v| v.as_object()) else {
            return SalaryFields::default();
        };

        let currency = salary
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
            lower: salary.get("from").and_then(amount),
            upper: salary.get("to").and_then(amount),
            currency,
        }
    }
}
