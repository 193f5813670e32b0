use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

/// Count of requests served under `/app` since startup or the last reset.
///
/// Process-local; every replica keeps its own count.
#[derive(Debug, Default)]
pub struct FileServerMetrics {
    hits: AtomicU64,
}

impl FileServerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}

/// Middleware counting every request that reaches the static file server
pub async fn count_file_server_hits(
    State(metrics): State<Arc<FileServerMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    metrics.record_hit();
    next.run(req).await
}
