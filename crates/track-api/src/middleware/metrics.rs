//! # Request Metrics
//!
//! Lightweight request metrics using atomic counters. The middleware counts
//! requests and error responses; the transaction handler counts commits.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Shared metrics state.
#[derive(Debug, Clone, Default)]
pub struct ApiMetrics {
    pub request_count: Arc<AtomicU64>,
    pub error_count: Arc<AtomicU64>,
    pub commit_count: Arc<AtomicU64>,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests seen.
    pub fn requests(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Responses with a 4xx or 5xx status.
    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Submit transactions whose write set was committed.
    pub fn commits(&self) -> u64 {
        self.commit_count.load(Ordering::Relaxed)
    }

    pub fn record_commit(&self) {
        self.commit_count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Middleware that increments request and error counters.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.request_count.fetch_add(1, Ordering::Relaxed);
        if response.status().is_server_error() || response.status().is_client_error() {
            m.error_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_counters() {
        let metrics = ApiMetrics::new();
        let handle = metrics.clone();
        handle.record_commit();
        handle.record_commit();
        assert_eq!(metrics.commits(), 2);
        assert_eq!(metrics.requests(), 0);
    }
}
