use crate::core::aggregate::language_stats;
use crate::core::collector::PaginatedCollector;
use crate::domain::model::{LanguageStats, RunReport, SourceResultSet};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::{Result, StatsError};
use std::time::Duration;

/// A job board together with the region it is queried for.
pub struct SourceTarget {
    pub adapter: Box<dyn SourceAdapter>,
    pub region_id: u32,
}

impl SourceTarget {
    pub fn new(adapter: impl SourceAdapter + 'static, region_id: u32) -> Self {
        Self {
            adapter: Box::new(adapter),
            region_id,
        }
    }
}

/// Outcome of one (language, source) collection.
#[derive(Debug)]
enum PairOutcome {
    Aggregated(LanguageStats),
    Unavailable(StatsError),
}

pub struct SalaryEngine {
    collector: PaginatedCollector,
    sources: Vec<SourceTarget>,
    languages: Vec<String>,
    network_pause: Duration,
}

impl SalaryEngine {
    pub fn new(
        collector: PaginatedCollector,
        sources: Vec<SourceTarget>,
        languages: Vec<String>,
        network_pause: Duration,
    ) -> Self {
        Self {
            collector,
            sources,
            languages,
            network_pause,
        }
    }

    /// Collects and aggregates every language on every source, in order.
    ///
    /// A network failure records the (language, source) pair as unavailable,
    /// pauses and moves on to the next language; sources after the failing one
    /// are not queried for that language. Any other error aborts the run and
    /// discards everything gathered so far.
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!(
            "Collecting salary statistics for {} languages from {} sources",
            self.languages.len(),
            self.sources.len()
        );

        let mut result_sets: Vec<SourceResultSet> = self
            .sources
            .iter()
            .map(|source| SourceResultSet::new(source.adapter.kind(), source.region_id))
            .collect();
        let mut unavailable = Vec::new();

        for language in &self.languages {
            for (source, result_set) in self.sources.iter().zip(result_sets.iter_mut()) {
                match self.process_pair(source, language).await? {
                    PairOutcome::Aggregated(stats) => {
                        tracing::info!(
                            "{} {}: found {}, processed {}, average {:?}",
                            source.adapter.kind(),
                            language,
                            stats.vacancies_found,
                            stats.vacancies_processed,
                            stats.average_salary
                        );
                        result_set.insert(language.as_str(), stats);
                    }
                    PairOutcome::Unavailable(err) => {
                        tracing::warn!(
                            "⚠️ {}: connection problem, statistics for {} were not collected: {}",
                            source.adapter.kind(),
                            language,
                            err
                        );
                        unavailable.push((source.adapter.kind(), language.clone()));
                        tokio::time::sleep(self.network_pause).await;
                        // 後面的來源不再查詢這個語言
                        break;
                    }
                }
            }
        }

        Ok(RunReport {
            result_sets,
            unavailable,
        })
    }

    async fn process_pair(&self, source: &SourceTarget, language: &str) -> Result<PairOutcome> {
        tracing::debug!("{} {}: collecting", source.adapter.kind(), language);

        match self
            .collector
            .collect(source.adapter.as_ref(), language, source.region_id)
            .await
        {
            Ok((listings, found)) => Ok(PairOutcome::Aggregated(language_stats(
                found,
                source.adapter.as_ref(),
                &listings,
            ))),
            Err(err) if err.is_recoverable() => Ok(PairOutcome::Unavailable(err)),
            Err(err) => {
                tracing::error!(
                    "❌ {} {}: aborting run: {}",
                    source.adapter.kind(),
                    language,
                    err
                );
                Err(err)
            }
        }
    }
}
