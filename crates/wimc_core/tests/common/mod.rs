#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use wimc_core::{HttpRequest, HttpResponse, HttpTransport, Navigator, TransportError};

/// In-memory transport answering from a queue and recording every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every request waits for one `notify_one` on `gate` before answering.
    pub fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            gate: Some(gate),
            ..Self::default()
        })
    }

    pub fn push(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push(HttpResponse::new(status, body.to_string()));
    }

    pub fn push_status(&self, status: u16) {
        self.push(HttpResponse::new(status, Vec::new()));
    }

    pub fn push_unreachable(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Unreachable("connection refused".to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Unreachable("no scripted response".to_string())))
    }
}

/// Navigator double counting route changes and back navigations.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
    backs: AtomicUsize,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }

    pub fn back_count(&self) -> usize {
        self.backs.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }

    fn back(&self) {
        self.backs.fetch_add(1, Ordering::SeqCst);
    }
}
