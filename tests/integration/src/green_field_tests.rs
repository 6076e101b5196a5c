//! Basic resolution through the public database API

use pretty_assertions::assert_eq;
use propdb_core::{Error, PropertyDatabase, PropertyKind};
use propdb_loaders::{EnvironmentPropertyLoader, StaticPropertyLoader};
use serde_json::{Value, json};

fn database() -> PropertyDatabase {
    PropertyDatabase::new(Vec::<String>::new())
}

#[tokio::test]
async fn test_single_property_can_be_retrieved() {
    let mut config = database();
    config.with_property_loader(StaticPropertyLoader::new(json!({ "foo": "bar" })));
    config.load_properties().await.unwrap();
    assert_eq!(config.get("foo").unwrap().as_string().unwrap(), "bar");
}

#[tokio::test]
async fn test_single_number_property_can_be_retrieved() {
    let mut config = database();
    config.with_property_loader(StaticPropertyLoader::new(json!({ "foo": 5 })));
    config.load_properties().await.unwrap();

    let foo = config.get("foo").unwrap();
    assert_eq!(foo.as_string().unwrap(), "5");
    assert_eq!(foo.as_number().unwrap(), 5.0);
}

#[tokio::test]
async fn test_multiple_property_sources_dont_collide() {
    let mut config = database();
    config
        .with_property_loader(StaticPropertyLoader::new(json!({ "foo": 5 })))
        .which_overrides(StaticPropertyLoader::new(json!({ "bar": "bang" })));
    config.load_properties().await.unwrap();

    assert_eq!(config.get("foo").unwrap().as_number().unwrap(), 5.0);
    assert_eq!(config.get("bar").unwrap().as_string().unwrap(), "bang");
}

#[tokio::test]
async fn test_overriding_property_source_overrides_property() {
    let mut config = database();
    config
        .with_property_loader(StaticPropertyLoader::new(json!({ "foo": 5, "bar": "test" })))
        .which_overrides(StaticPropertyLoader::new(json!({ "bar": "bang" })));
    config.load_properties().await.unwrap();

    assert_eq!(config.get("foo").unwrap().as_string().unwrap(), "5");
    assert_eq!(config.get("bar").unwrap().as_string().unwrap(), "test");
}

#[tokio::test]
async fn test_nested_property_can_be_overridden() {
    let mut config = database();
    config
        .with_property_loader(StaticPropertyLoader::new(json!({ "foo": { "bar": "test" } })))
        .which_overrides(StaticPropertyLoader::new(json!({ "foo": { "bar": "bang" } })));
    config.load_properties().await.unwrap();

    let record = config.get("foo.bar").unwrap().record().cloned().unwrap();
    assert_eq!(record.value, "test");
    assert_eq!(record.overwritten().unwrap().value, "bang");
}

#[tokio::test]
async fn test_env_vars_can_override_other_vars() {
    let mut config = database();
    config
        .with_property_loader(EnvironmentPropertyLoader::new([("FOO_BAR", "thing")]))
        .which_overrides(StaticPropertyLoader::new(json!({ "foo": { "bar": "test" } })));
    config.load_properties().await.unwrap();
    assert_eq!(config.get("foo.bar").unwrap().as_string().unwrap(), "thing");
}

#[tokio::test]
async fn test_env_vars_wont_override_higher_precedence() {
    let mut config = database();
    config
        .with_property_loader(StaticPropertyLoader::new(json!({ "foo": { "bar": "test" } })))
        .which_overrides(EnvironmentPropertyLoader::new([("FOO_BAR", "thing")]));
    config.load_properties().await.unwrap();

    assert_eq!(config.get("foo.bar").unwrap().as_string().unwrap(), "test");
    let object = config.get("foo").unwrap().as_object().unwrap();
    assert_eq!(Value::Object(object), json!({ "bar": "test" }));
}

#[tokio::test]
async fn test_typed_accessors_and_defaults() {
    let mut config = database();
    config.with_property_loader(StaticPropertyLoader::new(json!({
        "server": { "port": "8080abc", "debug": "TRUE", "name": "api" }
    })));
    config.load_properties().await.unwrap();

    assert_eq!(config.get("server.port").unwrap().as_number().unwrap(), 8080.0);
    assert!(config.get("server.debug").unwrap().as_boolean().unwrap());
    assert!(!config.get("server.name").unwrap().as_boolean().unwrap());
    assert_eq!(config.get("server.timeout").unwrap().as_number_or(30.0), 30.0);
    assert!(config.get("server.tls").unwrap().as_boolean_or(true));

    let err = config.get("server.timeout").unwrap().as_number().unwrap_err();
    assert!(matches!(err, Error::PropertyNotSet { kind: PropertyKind::Number, .. }));
}

#[tokio::test]
async fn test_queries_before_load_fail() {
    let config = database();
    assert!(matches!(config.get("foo").unwrap_err(), Error::NotLoaded));
}
