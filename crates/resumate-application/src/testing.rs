//! Test doubles shared by the use case tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use resumate_core::api::{ApiReply, ApiRequest, ApiTransport};
use resumate_core::clock::ManualClock;
use resumate_core::error::{ResumateError, Result};
use resumate_core::kv::InMemoryStore;
use resumate_core::session::SessionRepository;
use resumate_infrastructure::SessionStore;

/// Transport that replays queued replies and records every request.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Result<ApiReply>>>,
    requests: Mutex<Vec<(ApiRequest, Option<String>)>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeTransport {
    pub fn with_replies(replies: Vec<Result<ApiReply>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    /// Makes the next call wait until the returned handle is notified.
    pub fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> (ApiRequest, Option<String>) {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl ApiTransport for FakeTransport {
    async fn execute(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<ApiReply> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), bearer.map(str::to_string)));

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ResumateError::internal("no reply queued")))
    }
}

pub fn session_store(kv: Arc<InMemoryStore>, clock: ManualClock) -> Arc<dyn SessionRepository> {
    Arc::new(SessionStore::new(kv, Arc::new(clock)))
}
