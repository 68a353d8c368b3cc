//! Integration tests for the sync public API: orchestrator + fetchers
//! against a mock HTTP catalog and a temp-dir store.

use element_templates::catalog::{CatalogHttp, MarketplaceCatalog, MetadataCatalog};
use element_templates::model::Template;
use element_templates::store::TemplateStore;
use element_templates::sync::{FixedPlatformVersion, SyncOrchestrator, SyncRun};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;

fn metadata_orchestrator(server: &MockServer, store: TemplateStore) -> SyncOrchestrator {
    let source = MetadataCatalog::new(
        "execution-platform templates",
        server.url("/catalog.json"),
        CatalogHttp::new(),
    );
    SyncOrchestrator::new(
        Box::new(source),
        store,
        Box::new(FixedPlatformVersion("8.8".into())),
    )
    .with_interval(Duration::ZERO)
}

fn completed(run: SyncRun) -> element_templates::sync::SyncOutcome {
    match run {
        SyncRun::Completed(outcome) => outcome,
        SyncRun::Dropped => panic!("expected a completed run"),
    }
}

#[test]
fn sync_appends_only_the_new_compatible_entry() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/catalog.json");
        then.status(200).json_body(json!({
            "present": [{"id": "present", "version": 1, "ref": server.url("/refs/present-1")}],
            "new": [{"id": "new", "version": 1, "ref": server.url("/refs/new-1")}]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/refs/new-1");
        then.status(200).json_body(json!({"id": "new", "version": 1}));
    });
    let present_ref = server.mock(|when, then| {
        when.method(GET).path("/refs/present-1");
        then.status(200).json_body(json!({"id": "present", "version": 1}));
    });

    let temp = TempDir::new().unwrap();
    let store = TemplateStore::new(temp.path().join("store.json"));
    let previous: Vec<Template> =
        serde_json::from_value(json!([{"id": "present", "version": 1}])).unwrap();
    store.save(&previous).unwrap();

    let mut orch = metadata_orchestrator(&server, store.clone());
    let outcome = completed(orch.trigger().unwrap());

    assert!(outcome.has_new);
    assert!(outcome.warnings.is_empty());
    assert_eq!(store.load().len(), previous.len() + 1);
    present_ref.assert_calls(0);
}

#[test]
fn sync_twice_against_unchanged_catalog_is_idempotent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/catalog.json");
        then.status(200).json_body(json!({
            "X": [{"id": "X", "version": 1, "ref": server.url("/refs/x-1")}]
        }));
    });
    let ref_mock = server.mock(|when, then| {
        when.method(GET).path("/refs/x-1");
        then.status(200).json_body(json!({"id": "X", "version": 1}));
    });

    let temp = TempDir::new().unwrap();
    let store = TemplateStore::new(temp.path().join("store.json"));
    let mut orch = metadata_orchestrator(&server, store.clone());

    completed(orch.trigger().unwrap());
    let after_first = store.load();

    let second = completed(orch.trigger().unwrap());
    assert!(!second.has_new);
    assert_eq!(store.load(), after_first);
    ref_mock.assert_calls(1);
}

#[test]
fn catalog_http_500_leaves_store_unchanged_with_one_warning() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/catalog.json");
        then.status(500).body("Internal Server Error");
    });

    let temp = TempDir::new().unwrap();
    let store = TemplateStore::new(temp.path().join("store.json"));
    let previous: Vec<Template> =
        serde_json::from_value(json!([{"id": "kept", "version": 3}])).unwrap();
    store.save(&previous).unwrap();

    let mut orch = metadata_orchestrator(&server, store.clone());
    let outcome = completed(orch.trigger().unwrap());

    assert!(!outcome.has_new);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("500"));
    assert_eq!(store.load(), previous);
}

#[test]
fn metadata_merge_never_replaces_but_marketplace_merge_does() {
    let server = MockServer::start();

    // Metadata catalog advertising an identity already in the store.
    server.mock(|when, then| {
        when.method(GET).path("/catalog.json");
        then.status(200).json_body(json!({
            "X": [{"id": "X", "version": 1, "ref": server.url("/refs/x-meta")}]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/refs/x-meta");
        then.status(200).json_body(json!({"id": "X", "version": 1, "name": "from metadata"}));
    });

    // Marketplace advertising the same identity with a fresh body.
    server.mock(|when, then| {
        when.method(GET).path("/listing");
        then.status(200).json_body(json!([{"id": "x-item"}]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/items/x-item");
        then.status(200).json_body(json!({
            "templates": [{"id": "X", "version": 1, "ref": server.url("/refs/x-market")}]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/refs/x-market");
        then.status(200)
            .json_body(json!({"id": "X", "version": 1, "name": "from marketplace"}));
    });

    let previous: Vec<Template> =
        serde_json::from_value(json!([{"id": "X", "version": 1, "name": "original"}])).unwrap();

    // Metadata: identity present, body untouched.
    let temp = TempDir::new().unwrap();
    let store = TemplateStore::new(temp.path().join("meta.json"));
    store.save(&previous).unwrap();
    let mut orch = metadata_orchestrator(&server, store.clone());
    completed(orch.trigger().unwrap());
    assert_eq!(
        store.load()[0].extra.get("name"),
        Some(&json!("original"))
    );

    // Marketplace: identity present, body replaced.
    let store = TemplateStore::new(temp.path().join("market.json"));
    store.save(&previous).unwrap();
    let source = MarketplaceCatalog::new(
        "connector templates",
        server.url("/listing"),
        server.url("/items"),
        CatalogHttp::new(),
    );
    let mut orch = SyncOrchestrator::new(
        Box::new(source),
        store.clone(),
        Box::new(FixedPlatformVersion("8.8".into())),
    );
    let outcome = completed(orch.trigger().unwrap());

    assert!(outcome.has_new);
    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].extra.get("name"), Some(&json!("from marketplace")));
}

#[test]
fn marketplace_listing_failure_is_a_fatal_outcome() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/listing");
        then.status(503).body("maintenance");
    });

    let temp = TempDir::new().unwrap();
    let store = TemplateStore::new(temp.path().join("store.json"));
    let previous: Vec<Template> = serde_json::from_value(json!([{"id": "kept"}])).unwrap();
    store.save(&previous).unwrap();

    let source = MarketplaceCatalog::new(
        "connector templates",
        server.url("/listing"),
        server.url("/items"),
        CatalogHttp::new(),
    );
    let mut orch = SyncOrchestrator::new(
        Box::new(source),
        store.clone(),
        Box::new(FixedPlatformVersion("8.8".into())),
    );

    let err = orch.trigger().unwrap_err();
    assert!(err.to_string().contains("503"));
    assert_eq!(store.load(), previous);
}

#[test]
fn corrupt_store_is_regenerated_from_the_catalog() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/catalog.json");
        then.status(200).json_body(json!({
            "X": [{"id": "X", "version": 1, "ref": server.url("/refs/x-1")}]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/refs/x-1");
        then.status(200).json_body(json!({"id": "X", "version": 1}));
    });

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    std::fs::write(&path, "garbage\x00not json").unwrap();

    let store = TemplateStore::new(&path);
    let mut orch = metadata_orchestrator(&server, store.clone());
    let outcome = completed(orch.trigger().unwrap());

    assert!(outcome.has_new);
    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "X");
}

#[test]
fn incompatible_entries_are_filtered_by_platform_version() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/catalog.json");
        then.status(200).json_body(json!({
            "old": [{"id": "old", "version": 1, "ref": server.url("/refs/old-1")}],
            "next": [{
                "id": "next", "version": 1,
                "ref": server.url("/refs/next-1"),
                "engine": {"camunda": "^8.9"}
            }]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/refs/old-1");
        then.status(200).json_body(json!({"id": "old", "version": 1}));
    });
    let gated_ref = server.mock(|when, then| {
        when.method(GET).path("/refs/next-1");
        then.status(200).json_body(json!({"id": "next", "version": 1}));
    });

    let temp = TempDir::new().unwrap();
    let store = TemplateStore::new(temp.path().join("store.json"));
    let mut orch = metadata_orchestrator(&server, store.clone());
    let outcome = completed(orch.trigger().unwrap());

    assert!(outcome.warnings.is_empty());
    let ids: Vec<String> = store.load().iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, ["old"]);
    gated_ref.assert_calls(0);
}
