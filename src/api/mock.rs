//! Scripted transport for tests: replays queued responses in order and
//! records every request it sees.

use super::transport::{ApiRequest, Method, RawResponse, Transport};
use super::{ApiError, ApiResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(RawResponse {
            status,
            body: body.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// `(method, path)` pairs with the base URL stripped
    pub fn calls(&self, base_url: &str) -> Vec<(Method, String)> {
        self.requests()
            .into_iter()
            .map(|request| {
                let path = request
                    .url
                    .strip_prefix(base_url)
                    .unwrap_or(&request.url)
                    .to_string();
                (request.method, path)
            })
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApiError::Network(format!("no scripted response for {}", url)))
    }
}
