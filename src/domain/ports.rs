use crate::domain::model::{Listing, Page, SalaryFields, SourceKind, SourceRequest};
use crate::utils::error::Result;

/// A job board's request and response shape.
///
/// The collector and the aggregator only talk to sources through this trait,
/// so each board's query syntax, pagination signal and salary schema stay in
/// its own adapter.
pub trait SourceAdapter: Send + Sync {
    fn kind(&self) -> SourceKind;

    fn build_request(&self, language: &str, region_id: u32, page: u32) -> SourceRequest;

    /// Decodes a response body fetched for `page`.
    fn extract_page(&self, raw: serde_json::Value, page: u32) -> Result<Page>;

    /// Salary bounds of a listing, or empty bounds when it is not paid in rubles.
    fn salary_fields(&self, listing: &Listing) -> SalaryFields;
}

pub trait ConfigProvider: Send + Sync {
    fn hh_endpoint(&self) -> &str;
    fn hh_area_id(&self) -> u32;
    fn sj_endpoint(&self) -> &str;
    fn sj_town_id(&self) -> u32;
    fn superjob_key(&self) -> Option<&str>;
    fn languages(&self) -> &[String];
    fn network_pause_seconds(&self) -> u64;
    fn request_timeout_seconds(&self) -> Option<u64>;
}
