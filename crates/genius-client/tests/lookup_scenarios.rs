//! End-to-end lookup scenarios against a scripted Genius API.

mod common;

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use genius_client::{GeniusClient, HttpBackend};
use genius_core::{ArtistId, ResultRow};
use serde_json::json;
use tempfile::NamedTempFile;

use common::{config, hit, search_route, Fixture};

fn client(fixture: &Arc<Fixture>) -> GeniusClient {
    GeniusClient::with_backend(&config(), Arc::clone(fixture) as Arc<dyn HttpBackend>).unwrap()
}

fn by_term(rows: &[ResultRow]) -> HashMap<&str, &ResultRow> {
    rows.iter().map(|r| (r.search_term.as_str(), r)).collect()
}

#[tokio::test]
async fn test_radiohead_resolves_and_enriches() {
    let fixture = Fixture::new();
    fixture
        .search("Radiohead", json!([hit(1090, "Radiohead")]))
        .artist(1090, json!({"id": 1090, "name": "Radiohead", "followers_count": 999_999}));

    let rows = client(&fixture).lookup_all_with(["Radiohead"], 1).await;

    assert_eq!(
        rows,
        vec![ResultRow {
            search_term: "Radiohead".to_string(),
            artist_name: Some("Radiohead".to_string()),
            artist_id: Some(ArtistId::new(1090)),
            followers_count: Some(999_999),
            error: None,
        }]
    );
}

#[tokio::test]
async fn test_zero_hits_yield_null_row_with_error() {
    let fixture = Fixture::new();
    fixture.search("Qwxyzzy", json!([]));

    let row = client(&fixture).lookup("Qwxyzzy").await;

    assert_eq!(row.search_term, "Qwxyzzy");
    assert!(row.artist_name.is_none());
    assert!(row.artist_id.is_none());
    assert!(row.followers_count.is_none());
    assert_eq!(row.error.as_deref(), Some("no artist found for 'Qwxyzzy'"));
    assert_eq!(fixture.calls("artists/0"), 0);
}

#[tokio::test]
async fn test_details_failure_falls_back_to_search_data() {
    let fixture = Fixture::new();
    fixture.search("X", json!([hit(42, "X")])).artist_unreachable(42);

    let row = client(&fixture).lookup("X").await;

    assert_eq!(row.artist_name.as_deref(), Some("X"));
    assert_eq!(row.artist_id, Some(ArtistId::new(42)));
    assert!(row.followers_count.is_none());
    assert!(row
        .error
        .as_deref()
        .unwrap()
        .starts_with("artist details unavailable"));
}

#[tokio::test]
async fn test_rate_limited_search_is_retried_exactly_once() {
    let fixture = Fixture::new();
    fixture
        .search_status("Tycho", 429)
        .search("Tycho", json!([hit(7, "Tycho")]))
        .artist(7, json!({"id": 7, "name": "Tycho", "followers_count": 321}));

    let row = client(&fixture).lookup("Tycho").await;

    assert_eq!(row.followers_count, Some(321));
    assert!(row.error.is_none());
    assert_eq!(fixture.calls(&search_route("Tycho")), 2);
    assert_eq!(fixture.calls("artists/7"), 1);
}

#[tokio::test]
async fn test_persistent_rate_limit_stops_after_one_retry() {
    let fixture = Fixture::new();
    fixture.search_status("Busy", 429);

    let row = client(&fixture).lookup("Busy").await;

    assert!(!row.is_resolved());
    assert!(row.error.as_deref().unwrap().contains("rate limited"));
    assert_eq!(fixture.calls(&search_route("Busy")), 2);
}

#[tokio::test]
async fn test_concurrent_batch_returns_every_term_once() {
    let fixture = Fixture::new();
    let names = ["Rihanna", "Tycho", "Seal", "U2"];
    for (id, name) in (1..).zip(names) {
        fixture
            .search(name, json!([hit(id, name)]))
            .artist(id, json!({"id": id, "name": name, "followers_count": id}));
    }

    let rows = client(&fixture).lookup_all_with(names, 4).await;

    assert_eq!(rows.len(), 4);
    let rows = by_term(&rows);
    for (id, name) in (1..).zip(names) {
        let row = rows[name];
        assert_eq!(row.artist_id, Some(ArtistId::new(id)));
        assert_eq!(row.followers_count, Some(id));
    }
}

#[tokio::test]
async fn test_batch_cardinality_with_mixed_failures() {
    let fixture = Fixture::new();
    fixture
        .search("Seal", json!([hit(3, "Seal")]))
        .artist(3, json!({"id": 3, "name": "Seal", "stats": {"followers_count": 30}}))
        .search_status("Broken", 500)
        .search("Empty", json!([]))
        .search("Partial", json!([hit(9, "Partial")]))
        .artist_unreachable(9);

    let terms = ["Seal", "Broken", "Empty", "Partial", "Unknown"];
    for workers in [1, 2, 10] {
        let rows = client(&fixture).lookup_all_with(terms, workers).await;
        assert_eq!(rows.len(), terms.len());

        if workers == 1 {
            let order: Vec<&str> = rows.iter().map(|r| r.search_term.as_str()).collect();
            assert_eq!(order, terms);
        }

        let rows = by_term(&rows);
        assert_eq!(rows["Seal"].followers_count, Some(30));
        assert!(rows["Broken"].error.as_deref().unwrap().contains("HTTP 500"));
        assert!(rows["Empty"].artist_id.is_none());
        assert_eq!(rows["Partial"].artist_id, Some(ArtistId::new(9)));
        assert!(rows["Unknown"].error.is_some());
    }
}

#[tokio::test]
async fn test_get_artist_is_idempotent() {
    let fixture = Fixture::new();
    fixture
        .search("Radiohead", json!([hit(1090, "Radiohead")]))
        .artist(1090, json!({
            "id": 1090,
            "name": "Radiohead",
            "followers_count": 999_999,
            "url": "https://genius.com/artists/Radiohead"
        }));
    let client = client(&fixture);

    let first = client.get_artist("Radiohead").await;
    let second = client.get_artist("Radiohead").await;

    assert_eq!(first, second);
    assert_eq!(first.url.as_deref(), Some("https://genius.com/artists/Radiohead"));
}

#[tokio::test]
async fn test_resolve_then_enrich_separately() {
    let fixture = Fixture::new();
    fixture
        .search("U2", json!([hit(12, "U2"), hit(13, "Bono")]))
        .artist(12, json!({"id": 12, "name": "U2", "followers_count": 5}));
    let client = client(&fixture);

    let candidate = client.resolve("U2").await;
    assert_eq!(candidate.identifier, Some(ArtistId::new(12)));

    let record = client.enrich(&candidate).await;
    assert_eq!(record.follower_count, Some(5));
}

#[tokio::test]
async fn test_fallback_only_mode_uses_captured_search() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        json!({"response": {"hits": [hit(1090, "Radiohead")]}})
    )
    .unwrap();

    let fixture = Fixture::new();
    let config = genius_client::Config::default().with_fallback_source(file.path());
    let client = GeniusClient::with_backend(&config, Arc::clone(&fixture) as Arc<dyn HttpBackend>).unwrap();
    assert!(!client.is_live());

    let rows = client.lookup_all_with(["anything", "else"], 1).await;

    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.artist_id, Some(ArtistId::new(1090)));
        assert_eq!(row.artist_name.as_deref(), Some("Radiohead"));
        assert!(row.followers_count.is_none());
        let error = row.error.as_deref().unwrap();
        assert!(error.starts_with("answered from fallback source (no access token"));
        assert!(error.contains("artist details unavailable"));
    }
    assert_eq!(fixture.calls(&search_route("anything")), 0);

    let record = client.get_artist("anything").await;
    assert_eq!(record.identifier, Some(ArtistId::new(1090)));
}
