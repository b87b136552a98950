//! In-memory transport for driving the client without a server.

use crate::error::TransportError;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

type Observer = Arc<dyn Fn(&ApiRequest) + Send + Sync>;

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<ApiResponse, TransportError>>,
    requests: Vec<ApiRequest>,
    observer: Option<Observer>,
}

/// Replays queued responses in order and records every request.
///
/// Clones share the same script, so a test can keep a handle after moving
/// the transport into a client. A request with nothing queued gets a
/// transport error.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    /// Creates a transport with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_script<R>(&self, f: impl FnOnce(&mut Script) -> R) -> R {
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut script)
    }

    /// Queues an HTTP response.
    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.with_script(|s| s.replies.push_back(Ok(ApiResponse::new(status, body))));
        self
    }

    /// Queues a transport failure.
    pub fn fail(&self, details: &str) -> &Self {
        self.with_script(|s| s.replies.push_back(Err(TransportError::new(details))));
        self
    }

    /// Runs `observer` on each request before its reply is returned.
    pub fn observe(&self, observer: impl Fn(&ApiRequest) + Send + Sync + 'static) {
        self.with_script(|s| s.observer = Some(Arc::new(observer)));
    }

    /// Returns every request sent so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.with_script(|s| s.requests.clone())
    }

    /// Returns how many requests were sent.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.with_script(|s| s.requests.len())
    }

    /// Returns how many queued replies were never consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.with_script(|s| s.replies.len())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let (observer, reply) = self.with_script(|s| {
            s.requests.push(request.clone());
            (s.observer.clone(), s.replies.pop_front())
        });
        if let Some(observer) = observer {
            observer(&request);
        }
        reply.unwrap_or_else(|| {
            Err(TransportError::new(format!(
                "no scripted reply for {} {}",
                request.method.as_str(),
                request.path
            )))
        })
    }
}
