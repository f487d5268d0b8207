//! Scripted Genius API for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{LookupError, LookupResult};
use crate::lookup::{Enricher, LookupPipeline, Resolver};
use crate::transport::{ApiRequest, HttpBackend, RawResponse, Transport};
use crate::FallbackSource;

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Json(u16, Value),
    Fail,
    Panic,
}

/// Routes requests by `path` (plus `?q=` for searches). Each route replays
/// its replies in order and repeats the last one; unknown routes are 404.
#[derive(Debug, Default)]
pub(crate) struct FakeGenius {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeGenius {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn reply(&self, route: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn search(&self, term: &str, hits: Value) -> &Self {
        self.reply(&search_route(term), Reply::Json(200, search_body(hits)))
    }

    pub(crate) fn artist(&self, id: u64, artist: Value) -> &Self {
        self.reply(
            &format!("artists/{id}"),
            Reply::Json(200, json!({"response": {"artist": artist}})),
        )
    }

    pub(crate) fn calls_to(&self, route: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == route).count()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpBackend for FakeGenius {
    async fn send(&self, request: &ApiRequest) -> LookupResult<RawResponse> {
        let route = match request.query_param("q") {
            Some(q) => format!("{}?q={}", request.path, q),
            None => request.path.clone(),
        };
        self.calls.lock().unwrap().push(route.clone());

        let reply = {
            let mut routes = self.routes.lock().unwrap();
            routes.get_mut(&route).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
        };

        match reply {
            Some(Reply::Json(status, body)) => Ok(RawResponse::new(status, body.to_string())),
            Some(Reply::Fail) => Err(LookupError::Network("connection reset".to_string())),
            Some(Reply::Panic) => panic!("scripted panic for {route}"),
            None => Ok(RawResponse::new(404, r#"{"meta": {"status": 404, "message": "Not found"}}"#)),
        }
    }
}

pub(crate) fn search_route(term: &str) -> String {
    format!("search?q={term}")
}

pub(crate) fn search_body(hits: Value) -> Value {
    json!({"meta": {"status": 200}, "response": {"hits": hits}})
}

/// A search hit whose primary artist is `(id, name)`.
pub(crate) fn hit(id: u64, name: &str) -> Value {
    json!({"type": "song", "result": {"primary_artist": {
        "id": id, "name": name, "api_path": format!("/artists/{id}")
    }}})
}

pub(crate) fn live_config() -> Config {
    Config {
        rate_limit_delay_ms: 5,
        ..Config::default()
    }
    .with_access_token("test-token")
    .with_base_url("https://api.genius.test")
}

pub(crate) fn pipeline(config: &Config, fake: &Arc<FakeGenius>) -> LookupPipeline {
    let backend: Arc<dyn HttpBackend> = Arc::clone(fake) as Arc<dyn HttpBackend>;
    let transport = Arc::new(Transport::new(config, backend));
    let fallback = config.fallback_source_path.clone().map(FallbackSource::new);
    LookupPipeline::new(
        Resolver::new(Arc::clone(&transport), fallback),
        Enricher::new(transport),
    )
}
