//! Paper Finder
//!
//! Wraps a `PaperSource` with a time-bounded memo keyed by the exact
//! `(topic, limit)` pair. Only successful searches are remembered.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::adapters::PaperSource;
use crate::error::SearchError;
use crate::models::PaperRecord;
use crate::utils::TtlCache;

type SearchKey = (String, u32);

pub struct PaperFinder {
    source: Arc<dyn PaperSource>,
    cache: TtlCache<SearchKey, Arc<Vec<PaperRecord>>>,
}

impl PaperFinder {
    pub fn new(source: Arc<dyn PaperSource>, cache_ttl: Duration) -> Self {
        Self {
            source,
            cache: TtlCache::new(cache_ttl),
        }
    }

    /// Search for papers on `topic`, at most `limit` of them.
    ///
    /// Concurrent identical searches may both reach the network; the later
    /// result simply replaces the earlier one in the cache.
    pub async fn find(&self, topic: &str, limit: u32) -> Result<Vec<PaperRecord>, SearchError> {
        let key = (topic.to_string(), limit);
        if let Some(hit) = self.cache.get(&key) {
            debug!("Cache hit for '{}' (limit {})", topic, limit);
            return Ok(hit.as_ref().clone());
        }

        match self.source.search(topic, limit).await {
            Ok(papers) => {
                let papers = Arc::new(papers);
                self.cache.insert(key, Arc::clone(&papers));
                Ok(papers.as_ref().clone())
            }
            Err(e) => {
                warn!("Search for '{}' failed: {}", topic, e);
                Err(e)
            }
        }
    }

    /// Number of searches currently served from memory
    pub fn cached_searches(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ArxivClient;
    use crate::models::PublishedDate;
    use crate::test_support::{spawn_mock, RequestLog};
    use async_trait::async_trait;
    use axum::extract::{Query, State};
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails the first call, succeeds afterwards.
    struct FlakySource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PaperSource for FlakySource {
        async fn search(&self, topic: &str, _limit: u32) -> Result<Vec<PaperRecord>, SearchError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(SearchError::Transport("connection reset".to_string()));
            }
            Ok(vec![PaperRecord::new(
                topic,
                vec![],
                "",
                "id-1",
                PublishedDate::Unknown,
            )])
        }
    }

    async fn feed_handler(
        State(log): State<RequestLog>,
        Query(params): Query<HashMap<String, String>>,
    ) -> String {
        log.record(params);
        r#"<feed xmlns="http://www.w3.org/2005/Atom">
<entry><id>http://arxiv.org/abs/2401.00001v1</id><title>Paper A</title><summary>First.</summary></entry>
<entry><id>http://arxiv.org/abs/2401.00002v1</id><title>Paper B</title><summary>Second.</summary></entry>
</feed>"#
            .to_string()
    }

    async fn finder_against_mock(ttl: Duration) -> (PaperFinder, RequestLog) {
        let log = RequestLog::default();
        let app = Router::new()
            .route("/api/query", get(feed_handler))
            .with_state(log.clone());
        let base = spawn_mock(app).await;
        let client = ArxivClient::new(
            &format!("{}/api/query", base),
            Duration::from_secs(5),
            Duration::ZERO,
        )
        .unwrap();
        (PaperFinder::new(Arc::new(client), ttl), log)
    }

    #[tokio::test]
    async fn test_quantum_computing_scenario() {
        let (finder, log) = finder_against_mock(Duration::from_secs(300)).await;

        let papers = finder.find("quantum computing", 2).await.unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].title(), "Paper A");
        assert_eq!(papers[1].title(), "Paper B");
        assert!(papers
            .iter()
            .all(|p| p.published().to_string() == "unknown"));
        assert_eq!(log.count(), 1);
    }

    #[tokio::test]
    async fn test_identical_searches_hit_network_once() {
        let (finder, log) = finder_against_mock(Duration::from_secs(300)).await;

        let first = finder.find("quantum computing", 2).await.unwrap();
        let second = finder.find("quantum computing", 2).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(log.count(), 1);
        assert_eq!(finder.cached_searches(), 1);

        // a different limit is a different key
        finder.find("quantum computing", 3).await.unwrap();
        assert_eq!(log.count(), 2);
    }

    #[tokio::test]
    async fn test_refetch_after_window() {
        let (finder, log) = finder_against_mock(Duration::from_millis(50)).await;

        finder.find("quantum computing", 2).await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        finder.find("quantum computing", 2).await.unwrap();
        assert_eq!(log.count(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let source = Arc::new(FlakySource {
            calls: AtomicUsize::new(0),
        });
        let finder = PaperFinder::new(source.clone(), Duration::from_secs(300));

        assert!(finder.find("graphs", 1).await.is_err());
        assert_eq!(finder.cached_searches(), 0);

        let papers = finder.find("graphs", 1).await.unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
