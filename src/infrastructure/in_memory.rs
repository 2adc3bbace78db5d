use crate::domain::ports::{HttpRequest, HttpResponse, Transport};
use crate::error::TransportError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

type Reply = Result<HttpResponse, TransportError>;
type Handler = dyn Fn(&HttpRequest) -> Reply + Send + Sync;
type Latency = dyn Fn(&HttpRequest) -> Duration + Send + Sync;

/// A request seen by [`InMemoryTransport`], stamped with the (tokio) time
/// it arrived.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request: HttpRequest,
    pub received_at: Instant,
}

/// A transport that answers from memory instead of the network.
///
/// Replies come from a handler closure, or from a fixed script consumed in
/// order. Clones share their state, so a test can keep one handle and give
/// another to the client.
#[derive(Clone)]
pub struct InMemoryTransport {
    handler: Arc<Handler>,
    latency: Option<Arc<Latency>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    closed: Arc<AtomicBool>,
}

impl InMemoryTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&HttpRequest) -> Reply + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            latency: None,
            requests: Arc::default(),
            closed: Arc::default(),
        }
    }

    /// Replays `replies` one per request; once exhausted every request
    /// gets a 500.
    pub fn from_responses(replies: impl IntoIterator<Item = Reply>) -> Self {
        let script = Mutex::new(replies.into_iter().collect::<VecDeque<_>>());
        Self::new(move |_| {
            lock(&script)
                .pop_front()
                .unwrap_or_else(|| Ok(HttpResponse::new(500, "script exhausted")))
        })
    }

    /// Delays each reply by the duration `latency` returns for the request.
    pub fn with_latency<F>(mut self, latency: F) -> Self
    where
        F: Fn(&HttpRequest) -> Duration + Send + Sync + 'static,
    {
        self.latency = Some(Arc::new(latency));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send(&self, request: &HttpRequest) -> Reply {
        lock(&self.requests).push(RecordedRequest {
            request: request.clone(),
            received_at: Instant::now(),
        });

        if let Some(latency) = &self.latency {
            tokio::time::sleep(latency(request)).await;
        }

        (self.handler)(request)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::endpoint::Endpoint;

    #[tokio::test]
    async fn test_script_is_replayed_in_order() {
        let transport = InMemoryTransport::from_responses([
            Err(TransportError::Timeout("slow".into())),
            Ok(HttpResponse::new(200, "{}")),
        ]);
        let request = HttpRequest::get(Endpoint::transaction("tx-1"));

        assert!(transport.send(&request).await.is_err());
        assert_eq!(transport.send(&request).await.unwrap().status, 200);
        assert_eq!(transport.send(&request).await.unwrap().status, 500);
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let transport = InMemoryTransport::new(|_| Ok(HttpResponse::new(204, "")));
        let handle = transport.clone();

        transport
            .send(&HttpRequest::get(Endpoint::transaction("tx-1")))
            .await
            .unwrap();
        transport.close().await;

        assert_eq!(handle.requests().len(), 1);
        assert!(handle.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let transport = InMemoryTransport::new(|_| Ok(HttpResponse::new(200, "{}")))
            .with_latency(|_| Duration::from_millis(250));
        let start = Instant::now();

        transport
            .send(&HttpRequest::get(Endpoint::transaction("tx-1")))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
