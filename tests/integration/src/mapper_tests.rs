//! Registered and explicit mappers

use pretty_assertions::assert_eq;
use propdb_core::{Error, PropertyDatabase, Result};
use propdb_loaders::StaticPropertyLoader;
use serde_json::{Value, json};

#[derive(Debug, PartialEq)]
struct Foo {
    bar: i64,
}

impl Foo {
    fn map(value: Value) -> Result<Foo> {
        let bar = value["bar"].as_str().unwrap_or_default();
        bar.parse()
            .map(|bar| Foo { bar })
            .map_err(|_| Error::mapping("foo", format!("bar is not an integer: {bar:?}")))
    }
}

#[derive(Debug, PartialEq)]
struct FooText {
    bar: String,
}

impl FooText {
    fn map(value: Value) -> Result<FooText> {
        Ok(FooText {
            bar: value["bar"].as_str().unwrap_or_default().to_string(),
        })
    }
}

#[derive(Debug, PartialEq)]
struct NamedFoo {
    name: String,
    bar: i64,
}

impl NamedFoo {
    fn map(name: &str, value: Value) -> Result<NamedFoo> {
        let foo = Foo::map(value)?;
        Ok(NamedFoo {
            name: name.to_string(),
            bar: foo.bar,
        })
    }
}

async fn database(mut register: impl FnMut(&mut PropertyDatabase), value: Value) -> PropertyDatabase {
    let mut config = PropertyDatabase::new(Vec::<String>::new());
    config.with_property_loader(StaticPropertyLoader::new(value));
    register(&mut config);
    config.load_properties().await.unwrap();
    config
}

fn nested() -> Value {
    json!({ "foo": { "test1": { "bar": 5 }, "test2": { "bar": 6 } } })
}

#[tokio::test]
async fn test_registered_mapper_can_be_used() {
    let config = database(
        |db| {
            db.register_mapper("foo", Foo::map);
        },
        json!({ "foo": { "bar": 5 } }),
    )
    .await;
    assert_eq!(config.get("foo").unwrap().as_mapped::<Foo>().unwrap(), Foo { bar: 5 });
}

#[tokio::test]
async fn test_explicit_mapper_without_registration() {
    let config = database(|_| {}, json!({ "foo": { "bar": 5 } })).await;
    assert_eq!(config.get("foo").unwrap().as_mapped_with(Foo::map).unwrap(), Foo { bar: 5 });
}

#[tokio::test]
async fn test_no_mapper_fails() {
    let config = database(|_| {}, json!({ "foo": { "bar": 5 } })).await;
    let err = config.get("foo").unwrap().as_mapped::<Foo>().unwrap_err();
    assert!(matches!(err, Error::NoMapperRegistered { ref key } if key == "foo"));
}

#[tokio::test]
async fn test_explicit_mapper_overrides_registered() {
    let config = database(
        |db| {
            db.register_mapper("foo", Foo::map);
        },
        json!({ "foo": { "bar": 5 } }),
    )
    .await;
    assert_eq!(
        config.get("foo").unwrap().as_mapped_with(FooText::map).unwrap(),
        FooText { bar: "5".to_string() }
    );
}

#[tokio::test]
async fn test_registered_mapper_of_other_type_is_reported() {
    let config = database(
        |db| {
            db.register_mapper("foo", Foo::map);
        },
        json!({ "foo": { "bar": 5 } }),
    )
    .await;
    let err = config.get("foo").unwrap().as_mapped::<FooText>().unwrap_err();
    assert!(matches!(err, Error::MapperTypeMismatch { .. }));
}

#[tokio::test]
async fn test_mapper_errors_propagate() {
    let config = database(
        |db| {
            db.register_mapper("foo", Foo::map);
        },
        json!({ "foo": { "bar": "five" } }),
    )
    .await;
    let err = config.get("foo").unwrap().as_mapped::<Foo>().unwrap_err();
    assert!(matches!(err, Error::Mapping { .. }));
}

#[tokio::test]
async fn test_registered_array_mapper_can_be_used() {
    let config = database(
        |db| {
            db.register_array_mapper("foo", NamedFoo::map);
        },
        nested(),
    )
    .await;
    assert_eq!(
        config.get("foo").unwrap().as_mapped_array::<NamedFoo>().unwrap(),
        vec![
            NamedFoo { name: "test1".to_string(), bar: 5 },
            NamedFoo { name: "test2".to_string(), bar: 6 },
        ]
    );
}

#[tokio::test]
async fn test_explicit_array_mapper_overrides_registered() {
    let config = database(
        |db| {
            db.register_array_mapper("foo", NamedFoo::map);
        },
        nested(),
    )
    .await;
    let mapped = config
        .get("foo")
        .unwrap()
        .as_mapped_array_with(|name, value| Ok((name.to_string(), FooText::map(value)?.bar)))
        .unwrap();
    assert_eq!(
        mapped,
        vec![
            ("test1".to_string(), "5".to_string()),
            ("test2".to_string(), "6".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_no_array_mapper_fails() {
    let config = database(|_| {}, nested()).await;
    let err = config.get("foo").unwrap().as_mapped_array::<NamedFoo>().unwrap_err();
    assert!(matches!(err, Error::NoMapperRegistered { .. }));
}

#[tokio::test]
async fn test_missing_namespace_uses_default() {
    let config = database(|_| {}, nested()).await;
    let fallback = config
        .get("missing")
        .unwrap()
        .as_mapped_array_or::<NamedFoo>(Vec::new())
        .unwrap();
    assert!(fallback.is_empty());
}
