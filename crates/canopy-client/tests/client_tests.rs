//! Integration tests for the DeliveryClient read path and hydration.

mod common;

use std::sync::Arc;

use canopy_client::{
    ApiMode, CacheStore, CanopyError, DeliveryClient, Entity, FieldValue, LinkKind, MemoryStore,
};
use common::StubSource;

fn client_with(source: Arc<StubSource>) -> DeliveryClient {
    DeliveryClient::builder("cfexampleapi")
        .source(source)
        .build()
        .unwrap()
}

#[test]
fn test_cold_cache_reads_match_live_values() {
    let source = Arc::new(StubSource::cfexampleapi());
    let store = Arc::new(MemoryStore::new());
    let client = DeliveryClient::builder("cfexampleapi")
        .source(source)
        .cache_store(store.clone())
        .build()
        .unwrap();

    // Empty cache: reads fall through to the live source and still yield
    // the canonical values.
    assert_eq!(client.space().unwrap().id(), "cfexampleapi");
    assert_eq!(client.content_type("cat").unwrap().id(), "cat");

    // Without auto-warmup nothing is written back.
    assert!(store.is_empty());
}

#[test]
fn test_warm_then_read_needs_no_live_fetch() {
    let store = Arc::new(MemoryStore::new());

    // Client A warms the store.
    let warming_client = DeliveryClient::builder("cfexampleapi")
        .source(Arc::new(StubSource::cfexampleapi()))
        .cache_store(store.clone())
        .build()
        .unwrap();
    warming_client.warm_up().unwrap();

    // Client B reads everything through the shared store.
    let reading_source = Arc::new(StubSource::cfexampleapi());
    let reading_client = DeliveryClient::builder("cfexampleapi")
        .source(reading_source.clone())
        .cache_store(store)
        .build()
        .unwrap();

    assert_eq!(reading_client.space().unwrap().id(), "cfexampleapi");
    assert_eq!(reading_client.content_type("cat").unwrap().id(), "cat");
    assert_eq!(reading_source.call_count(), 0);
}

#[test]
fn test_auto_warmup_populates_store_on_miss() {
    let store = Arc::new(MemoryStore::new());
    let client = DeliveryClient::builder("cfexampleapi")
        .source(Arc::new(StubSource::cfexampleapi()))
        .cache_store(store.clone())
        .auto_warmup(true)
        .build()
        .unwrap();

    assert_eq!(client.space().unwrap().id(), "cfexampleapi");

    let key = canopy_client::cache::key::space_key(ApiMode::Delivery, "cfexampleapi");
    let cached = store.get(&key).unwrap().expect("space key should be a hit");
    let raw: serde_json::Value = serde_json::from_str(&cached).unwrap();
    assert_eq!(raw["sys"]["id"], "cfexampleapi");
}

#[test]
fn test_entry_hydration() {
    let client = client_with(Arc::new(StubSource::cfexampleapi()));

    let entry = client.entry("nyancat").unwrap();
    assert_eq!(entry.id(), "nyancat");
    assert_eq!(entry.content_type_id(), "cat");
    assert_eq!(entry.field("name").and_then(FieldValue::as_str), Some("Nyan Cat"));
    assert_eq!(entry.field("lives").and_then(FieldValue::as_i64), Some(1337));

    let likes = entry.field("likes").and_then(FieldValue::as_array).unwrap();
    assert_eq!(likes.len(), 2);

    // Link-typed fields hydrate into placeholders, not fetched targets.
    let best_friend = entry.field("bestFriend").and_then(FieldValue::as_link).unwrap();
    assert_eq!(best_friend.id, "happycat");
    assert_eq!(best_friend.kind, LinkKind::Entry);

    assert!(client.drain_diagnostics().is_empty());
}

#[test]
fn test_asset_hydration() {
    let client = client_with(Arc::new(StubSource::cfexampleapi()));

    let asset = client.asset("nyancat").unwrap();
    assert_eq!(asset.id(), "nyancat");
    assert_eq!(asset.title(), Some("Nyan Cat"));
    let file = asset.file().unwrap();
    assert_eq!(file.mime_type.as_deref(), Some("image/png"));
    assert_eq!(file.size, Some(12273));
}

#[test]
fn test_stale_schema_degrades_to_diagnostics() {
    let client = client_with(Arc::new(StubSource::cfexampleapi()));

    // Inject a cached definition whose field list predates the fields the
    // live API now returns.
    let stale = serde_json::to_string(&common::stale_person_content_type()).unwrap();
    let revived = client.revive_json(&stale).unwrap();
    assert!(matches!(revived, Entity::ContentType(_)));

    // Hydration succeeds anyway.
    let entry = client.entry("Kpwt1njxgAm04oQYyUScm").unwrap();

    // Exactly one diagnostic per unknown field, in payload order.
    let diagnostics = client.drain_diagnostics();
    let fields: Vec<&str> = diagnostics.iter().map(|d| d.field_id.as_str()).collect();
    assert_eq!(fields, vec!["name", "jobTitle", "picture"]);

    for diagnostic in &diagnostics {
        assert_eq!(diagnostic.content_type_name, "Person");
        assert_eq!(diagnostic.content_type_id, "person");
        assert_eq!(diagnostic.entry_id, "Kpwt1njxgAm04oQYyUScm");
    }
    assert_eq!(
        diagnostics[0].to_string(),
        "Entry \"Kpwt1njxgAm04oQYyUScm\" of content type \"Person\" (\"person\") \
         contains field \"name\" which is not present in the content type \
         definition. Please check your cache for stale content type definitions."
    );

    // The entry still exposes correct values for every reported field.
    assert_eq!(entry.field("name").and_then(FieldValue::as_str), Some("Ben Chang"));
    assert_eq!(entry.field("jobTitle").and_then(FieldValue::as_str), Some("Señor"));
    let picture = entry.field("picture").and_then(FieldValue::as_link).unwrap();
    assert_eq!(picture.id, "SQOIQ1rZMQQUeyoyGiEUq");
    assert_eq!(picture.kind, LinkKind::Asset);

    // Draining leaves the sink empty.
    assert!(client.drain_diagnostics().is_empty());
}

#[test]
fn test_unsupported_entity_type_is_hard_failure() {
    let client = client_with(Arc::new(StubSource::cfexampleapi()));

    let result = client.revive_json(r#"{"sys": {"type": "DeletedEntry", "id": "gone"}}"#);
    assert!(matches!(
        result,
        Err(CanopyError::UnsupportedEntityType { ref kind }) if kind == "DeletedEntry"
    ));
}

#[test]
fn test_resolve_link() {
    let client = client_with(Arc::new(StubSource::cfexampleapi()));

    let entry = client.entry("nyancat").unwrap();
    let link = entry
        .field("bestFriend")
        .and_then(FieldValue::as_link)
        .unwrap()
        .clone();

    match client.resolve_link(&link).unwrap() {
        Entity::Entry(friend) => {
            assert_eq!(friend.id(), "happycat");
            assert_eq!(
                friend.field("name").and_then(FieldValue::as_str),
                Some("Happy Cat")
            );
        }
        other => panic!("expected entry, got {}", other.kind()),
    }

    // A dangling link surfaces the transport-level not-found, not a panic.
    let dangling = canopy_client::Link::new("missing", LinkKind::Entry);
    assert!(matches!(
        client.resolve_link(&dangling),
        Err(CanopyError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_entry_schema_miss_fetches_definition() {
    let source = Arc::new(StubSource::cfexampleapi());
    let client = client_with(source);

    // No content type registered yet; hydrating an entry pulls the schema
    // through the source and registers it.
    assert!(client.registry().is_empty());
    client.entry("nyancat").unwrap();
    assert!(client.registry().contains("cat"));
}
