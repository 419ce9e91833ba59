use crate::domain::model::{Listing, SourceRequest};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::{Result, StatsError};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("salary-stats/", env!("CARGO_PKG_VERSION"));

/// Walks every result page of a search, one request at a time.
pub struct PaginatedCollector {
    client: Client,
    timeout: Option<Duration>,
}

impl PaginatedCollector {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, timeout })
    }

    /// Fetches all listings of `language` and the total the source reported on its last page.
    ///
    /// Stops only when the adapter says the page was the last one. Any failure
    /// aborts the walk and nothing collected so far is returned.
    pub async fn collect(
        &self,
        adapter: &dyn SourceAdapter,
        language: &str,
        region_id: u32,
    ) -> Result<(Vec<Listing>, u64)> {
        let mut listings = Vec::new();
        let mut page = 0u32;

        loop {
            let request = adapter.build_request(language, region_id, page);
            let raw = self.fetch(adapter, &request).await?;
            let parsed = adapter.extract_page(raw, page)?;

            tracing::debug!(
                "{} {}: page {} returned {} items",
                adapter.kind(),
                language,
                page,
                parsed.items.len()
            );
            listings.extend(parsed.items);

            if parsed.is_last_page {
                tracing::debug!(
                    "{} {}: collected {} listings over {} pages, source reports {}",
                    adapter.kind(),
                    language,
                    listings.len(),
                    page + 1,
                    parsed.reported_total
                );
                return Ok((listings, parsed.reported_total));
            }
            page += 1;
        }
    }

    async fn fetch(
        &self,
        adapter: &dyn SourceAdapter,
        request: &SourceRequest,
    ) -> Result<serde_json::Value> {
        let mut builder = self.client.get(&request.url).query(&request.query);

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::trace!("{}: response status {}", adapter.kind(), status);

        if !status.is_success() {
            return Err(StatsError::ApiError {
                status: Some(status.as_u16()),
                message: format!("{} request to {} failed", adapter.kind(), request.url),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::headhunter::HeadHunterAdapter;
    use crate::adapters::superjob::SuperJobAdapter;
    use httpmock::prelude::*;
    use serde_json::json;

    fn hh_item(id: &str) -> serde_json::Value {
        json!({"id": id, "salary": null})
    }

    #[tokio::test]
    async fn test_single_page_stops_after_first_call() {
        let server = MockServer::start();
        let page0 = server.mock(|when, then| {
            when.method(GET).path("/vacancies/").query_param("page", "0");
            then.status(200).json_body(json!({
                "items": [hh_item("1"), hh_item("2")],
                "found": 2,
                "pages": 1,
                "page": 0
            }));
        });
        let page1 = server.mock(|when, then| {
            when.method(GET).path("/vacancies/").query_param("page", "1");
            then.status(200).json_body(json!({"items": [], "found": 2, "pages": 1}));
        });

        let adapter = HeadHunterAdapter::new(server.url("/vacancies/"));
        let collector = PaginatedCollector::new(None).unwrap();
        let (listings, total) = collector.collect(&adapter, "Go", 1).await.unwrap();

        page0.assert();
        page1.assert_hits(0);
        assert_eq!(listings.len(), 2);
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_pages_are_concatenated_in_order() {
        let server = MockServer::start();
        let mocks: Vec<_> = (0..3)
            .map(|page| {
                server.mock(|when, then| {
                    when.method(GET)
                        .path("/vacancies/")
                        .query_param("page", page.to_string());
                    then.status(200).json_body(json!({
                        "objects": [{"id": page * 10}, {"id": page * 10 + 1}],
                        "total": 6,
                        "more": (page < 2)
                    }));
                })
            })
            .collect();

        let adapter = SuperJobAdapter::new(server.url("/vacancies/"), "key");
        let collector = PaginatedCollector::new(None).unwrap();
        let (listings, total) = collector.collect(&adapter, "Rust", 4).await.unwrap();

        for mock in &mocks {
            mock.assert();
        }
        let ids: Vec<i64> = listings
            .iter()
            .map(|l| l.get("id").and_then(|v| v.as_i64()).unwrap())
            .collect();
        assert_eq!(ids, vec![0, 1, 10, 11, 20, 21]);
        assert_eq!(total, 6);
    }

    #[tokio::test]
    async fn test_reported_total_comes_from_last_page() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/vacancies/").query_param("page", "0");
            then.status(200)
                .json_body(json!({"items": [hh_item("1")], "found": 40, "pages": 2}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/vacancies/").query_param("page", "1");
            then.status(200)
                .json_body(json!({"items": [hh_item("2")], "found": 41, "pages": 2}));
        });

        let adapter = HeadHunterAdapter::new(server.url("/vacancies/"));
        let collector = PaginatedCollector::new(None).unwrap();
        let (listings, total) = collector.collect(&adapter, "Java", 1).await.unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(total, 41);
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/vacancies/");
            then.status(500);
        });

        let adapter = HeadHunterAdapter::new(server.url("/vacancies/"));
        let collector = PaginatedCollector::new(None).unwrap();
        let err = collector.collect(&adapter, "PHP", 1).await.unwrap_err();

        mock.assert();
        match err {
            StatsError::ApiError { status, .. } => assert_eq!(status, Some(500)),
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_on_later_page_returns_no_partial_result() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/vacancies/").query_param("page", "0");
            then.status(200)
                .json_body(json!({"objects": [{"id": 1}], "total": 2, "more": true}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/vacancies/").query_param("page", "1");
            then.status(403);
        });

        let adapter = SuperJobAdapter::new(server.url("/vacancies/"), "key");
        let collector = PaginatedCollector::new(None).unwrap();
        let result = collector.collect(&adapter, "Ruby", 4).await;

        assert!(matches!(
            result,
            Err(StatsError::ApiError {
                status: Some(403),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/vacancies/");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("<html>maintenance</html>");
        });

        let adapter = HeadHunterAdapter::new(server.url("/vacancies/"));
        let collector = PaginatedCollector::new(None).unwrap();
        let err = collector.collect(&adapter, "C", 1).await.unwrap_err();

        assert!(matches!(err, StatsError::ApiError { .. }));
    }

    #[tokio::test]
    async fn test_missing_envelope_field_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/vacancies/");
            then.status(200).json_body(json!({"found": 3, "pages": 1}));
        });

        let adapter = HeadHunterAdapter::new(server.url("/vacancies/"));
        let collector = PaginatedCollector::new(None).unwrap();
        let err = collector.collect(&adapter, "C", 1).await.unwrap_err();

        assert!(matches!(err, StatsError::ApiError { status: None, .. }));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // 沒有服務監聽的埠口
        let adapter = HeadHunterAdapter::new("http://127.0.0.1:1/vacancies/");
        let collector = PaginatedCollector::new(None).unwrap();
        let err = collector.collect(&adapter, "Scala", 1).await.unwrap_err();

        assert!(matches!(err, StatsError::NetworkError(_)));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_superjob_sends_api_key_header() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/2.0/vacancies/")
                .header("X-Api-App-Id", "secret-key")
                .query_param("town", "4")
                .query_param("catalogues", "48");
            then.status(200)
                .json_body(json!({"objects": [], "total": 0, "more": false}));
        });

        let adapter = SuperJobAdapter::new(server.url("/2.0/vacancies/"), "secret-key");
        let collector = PaginatedCollector::new(None).unwrap();
        let (listings, total) = collector.collect(&adapter, "C#", 4).await.unwrap();

        mock.assert();
        assert!(listings.is_empty());
        assert_eq!(total, 0);
    }
}
