//! Test doubles shared by the unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::api::http::{AsyncTransport, BlockingTransport, HttpRequest, HttpResponse};
use crate::error::{LoginRadiusError, Result};

/// Replays canned responses in order and records every request it sees.
///
/// Clones share the same script, so a test can keep a handle after boxing
/// one into a session.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<HttpResponse>>>,
    seen: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn next(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.seen.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LoginRadiusError::transport("no scripted response left"))
    }

    pub fn seen(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl BlockingTransport for ScriptedTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.next(request)
    }
}

#[async_trait::async_trait]
impl AsyncTransport for ScriptedTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.next(request)
    }
}
