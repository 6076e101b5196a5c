//! Reloading and failure behavior

use propdb_core::{Error, PropertyDatabase};
use propdb_loaders::StaticPropertyLoader;
use propdb_test_utils::{CountingLoader, FailingLoader, MapLoader};
use serde_json::json;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_properties_can_be_changed_and_reloaded() {
    let mut config = PropertyDatabase::new(Vec::<String>::new());
    let loader = StaticPropertyLoader::new(json!({ "foo": { "bar": 5 } }));
    config.with_property_loader(loader.clone());

    config.load_properties().await.unwrap();
    assert_eq!(config.get("foo.bar").unwrap().as_number().unwrap(), 5.0);

    loader.replace(json!({ "foo": { "bar": 6 } }));
    config.load_properties().await.unwrap();
    assert_eq!(config.get("foo.bar").unwrap().as_number().unwrap(), 6.0);
}

#[tokio::test]
async fn test_contexts_keep_the_view_they_were_created_from() {
    let mut config = PropertyDatabase::new(Vec::<String>::new());
    let loader = StaticPropertyLoader::new(json!({ "foo": "old" }));
    config.with_property_loader(loader.clone());
    config.load_properties().await.unwrap();

    let before = config.get("foo").unwrap();
    loader.replace(json!({ "foo": "new" }));
    config.load_properties().await.unwrap();

    assert_eq!(before.as_string().unwrap(), "old");
    assert_eq!(config.get("foo").unwrap().as_string().unwrap(), "new");
}

#[tokio::test]
async fn test_every_reload_calls_every_loader_with_profiles() {
    let counting = CountingLoader::new(MapLoader::new("a", json!({ "k": "v" })));
    let calls = counting.calls();
    let profiles = counting.last_profiles();

    let mut config = PropertyDatabase::new(["dev", "prod"]);
    config.use_loader(counting);
    config.load_properties().await.unwrap();
    config.load_properties().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(*profiles.lock().unwrap(), vec!["dev".to_string(), "prod".to_string()]);
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_view() {
    let mut config = PropertyDatabase::new(Vec::<String>::new());
    let loader = StaticPropertyLoader::new(json!({ "foo": "bar" }));
    config.use_loader(loader.clone());
    config.load_properties().await.unwrap();

    // arrays are rejected while flattening
    loader.replace(json!({ "foo": ["x", "y"] }));
    let err = config.load_properties().await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedValueKind { ref key, .. } if key == "foo"));
    assert_eq!(config.get("foo").unwrap().as_string().unwrap(), "bar");
}

#[tokio::test]
async fn test_first_failure_in_registration_order_is_reported() {
    let mut config = PropertyDatabase::new(Vec::<String>::new());
    config
        .with_property_loader(MapLoader::new("ok", json!({ "k": "v" })))
        .which_overrides(FailingLoader::new("first", "boom"))
        .which_overrides(FailingLoader::new("second", "bang"));

    let err = config.load_properties().await.unwrap_err();
    assert!(matches!(err, Error::LoaderFailure { ref loader, .. } if loader == "first"));
    assert!(!config.is_loaded());
}
