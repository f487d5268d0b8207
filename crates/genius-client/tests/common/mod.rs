//! Shared fixtures for genius-client integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use genius_client::{ApiRequest, Config, HttpBackend, LookupError, LookupResult, RawResponse};
use serde_json::{json, Value};

/// In-memory Genius API: each route answers with a fixed list of replies,
/// repeating the last one.
#[derive(Debug, Default)]
pub struct Fixture {
    routes: Mutex<HashMap<String, Vec<Option<RawResponse>>>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl Fixture {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, route: String, reply: Option<RawResponse>) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(route)
            .or_default()
            .push(reply);
        self
    }

    pub fn search(&self, term: &str, hits: Value) -> &Self {
        let body = json!({"meta": {"status": 200}, "response": {"hits": hits}});
        self.push(search_route(term), Some(RawResponse::new(200, body.to_string())))
    }

    pub fn search_status(&self, term: &str, status: u16) -> &Self {
        self.push(search_route(term), Some(RawResponse::new(status, "{}")))
    }

    pub fn artist(&self, id: u64, artist: Value) -> &Self {
        let body = json!({"meta": {"status": 200}, "response": {"artist": artist}});
        self.push(format!("artists/{id}"), Some(RawResponse::new(200, body.to_string())))
    }

    /// Make every call to `artists/{id}` fail at the network level.
    pub fn artist_unreachable(&self, id: u64) -> &Self {
        self.push(format!("artists/{id}"), None)
    }

    pub fn calls(&self, route: &str) -> usize {
        self.calls.lock().unwrap().get(route).copied().unwrap_or(0)
    }
}

#[async_trait]
impl HttpBackend for Fixture {
    async fn send(&self, request: &ApiRequest) -> LookupResult<RawResponse> {
        let route = match request.query_param("q") {
            Some(q) => search_route(q),
            None => request.path.clone(),
        };

        let call = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(route.clone()).or_default();
            *count += 1;
            *count
        };

        let routes = self.routes.lock().unwrap();
        let Some(replies) = routes.get(&route) else {
            return Ok(RawResponse::new(404, r#"{"meta": {"status": 404, "message": "Not found"}}"#));
        };
        let reply = replies
            .get(call - 1)
            .or_else(|| replies.last())
            .cloned()
            .flatten();

        reply.ok_or_else(|| LookupError::Network("connection refused".to_string()))
    }
}

pub fn search_route(term: &str) -> String {
    format!("search?q={term}")
}

pub fn hit(id: u64, name: &str) -> Value {
    json!({"type": "song", "result": {
        "title": format!("A song by {name}"),
        "primary_artist": {"id": id, "name": name, "api_path": format!("/artists/{id}")}
    }})
}

pub fn config() -> Config {
    Config {
        rate_limit_delay_ms: 10,
        ..Config::default()
    }
    .with_access_token("test-token")
    .with_base_url("https://api.genius.test")
}
