use crate::domain::model::{LanguageStats, Listing};
use crate::domain::ports::SourceAdapter;

/// Folds listings into `(processed, average)`.
///
/// Listings without a usable ruble salary are left out. The average is the
/// integer division of the summed estimates, so it truncates a second time
/// after the per-listing estimate did.
pub fn aggregate(adapter: &dyn SourceAdapter, listings: &[Listing]) -> (u64, Option<u64>) {
    let estimates: Vec<u64> = listings
        .iter()
        .filter_map(|listing| adapter.salary_fields(listing).estimate())
        .collect();

    average(&estimates)
}

fn average(estimates: &[u64]) -> (u64, Option<u64>) {
    if estimates.is_empty() {
        return (0, None);
    }
    let processed = estimates.len() as u64;
    let sum: u64 = estimates.iter().sum();
    (processed, Some(sum / processed))
}

pub fn language_stats(
    vacancies_found: u64,
    adapter: &dyn SourceAdapter,
    listings: &[Listing],
) -> LanguageStats {
    let (vacancies_processed, average_salary) = aggregate(adapter, listings);
    LanguageStats {
        vacancies_found,
        vacancies_processed,
        average_salary,
    }
}
