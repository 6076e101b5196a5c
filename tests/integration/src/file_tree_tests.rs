//! File discovery, profiles and multi-loader precedence on a real tree

use pretty_assertions::assert_eq;
use propdb_core::{Error, PropertyDatabase, PropertyLoader};
use propdb_loaders::{ConfigServerPropertyLoader, EnvironmentPropertyLoader, FilePropertyLoader};
use propdb_test_utils::ConfigTree;

fn tree() -> ConfigTree {
    ConfigTree::new()
        .with_file("application.yaml", "app:\n  name: base\n  port: 8080\n  region: none\n")
        .with_file("application-dev.yml", "app:\n  port: 3000\n")
        .with_file("application-prod.json", r#"{ "app": { "port": 80, "region": "eu" } }"#)
        .with_file("nested/application-dev.toml", "[app]\nport = 3001\n")
        .with_file("nested/application.properties", "app.name=nested\napp.owner=ops\n")
        .with_file("application-empty.yaml", "")
        .with_file("settings.yaml", "app:\n  name: ignored\n")
}

#[tokio::test]
async fn test_sources_are_ordered_by_precedence() {
    let tree = tree();
    let loader = FilePropertyLoader::new(tree.root());
    let profiles = vec!["dev".to_string(), "prod".to_string(), "empty".to_string()];
    let names: Vec<String> = loader
        .load_properties(&profiles)
        .await
        .unwrap()
        .iter()
        .map(|s| s.name().to_string())
        .collect();

    assert_eq!(
        names,
        vec![
            tree.source_name("nested/application-dev.toml"),
            tree.source_name("application-dev.yml"),
            tree.source_name("application-prod.json"),
            tree.source_name("application.yaml"),
            tree.source_name("nested/application.properties"),
        ]
    );
}

#[tokio::test]
async fn test_earlier_profile_wins() {
    let tree = tree();
    let mut config = PropertyDatabase::new(["dev", "prod"]);
    config.with_property_loader(FilePropertyLoader::new(tree.root()));
    config.load_properties().await.unwrap();

    assert_eq!(config.get("app.port").unwrap().as_number().unwrap(), 3001.0);
    assert_eq!(config.get("app.region").unwrap().as_string().unwrap(), "eu");
    assert_eq!(config.get("app.name").unwrap().as_string().unwrap(), "base");
    assert_eq!(config.get("app.owner").unwrap().as_string().unwrap(), "ops");

    let chain: Vec<String> = config
        .get("app.port")
        .unwrap()
        .record()
        .unwrap()
        .history()
        .map(|r| r.value.clone())
        .collect();
    assert_eq!(chain, vec!["3000", "80", "8080"]);
}

#[tokio::test]
async fn test_inactive_profiles_are_ignored() {
    let tree = tree();
    let mut config = PropertyDatabase::new(Vec::<String>::new());
    config.with_property_loader(FilePropertyLoader::new(tree.root()));
    config.load_properties().await.unwrap();

    assert_eq!(config.get("app.port").unwrap().as_number().unwrap(), 8080.0);
    assert_eq!(config.get("app.region").unwrap().as_string().unwrap(), "none");
}

#[tokio::test]
async fn test_environment_over_config_server_over_files() {
    let tree = tree();
    let server = ConfigServerPropertyLoader::from_json(
        r#"{ "PropertySources": [
            { "Name": "remote-prod", "Source": { "app.port": 9000 } },
            { "Name": "remote", "Source": { "app.port": 9001, "app.name": "remote" } }
        ] }"#,
    )
    .unwrap();

    let mut config = PropertyDatabase::new(["prod"]);
    config
        .with_property_loader(EnvironmentPropertyLoader::new([("APP_NAME", "from-env")]))
        .which_overrides(server)
        .which_overrides(FilePropertyLoader::new(tree.root()));
    config.load_properties().await.unwrap();

    assert_eq!(config.get("APP_NAME").unwrap().as_string().unwrap(), "from-env");
    let port = config.get("app.port").unwrap();
    let record = port.record().unwrap();
    assert_eq!(record.value, "9000");
    assert_eq!(record.source_name, "remote-prod");
    assert_eq!(record.overwritten().unwrap().source_name, "remote");
}

#[tokio::test]
async fn test_arrays_in_files_fail_the_load() {
    let tree = ConfigTree::new().with_file("application.yaml", "hosts:\n  - a\n  - b\n");
    let mut config = PropertyDatabase::new(Vec::<String>::new());
    config.with_property_loader(FilePropertyLoader::new(tree.root()));

    let err = config.load_properties().await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedValueKind { ref key, kind: "Array" } if key == "hosts"));
}

#[tokio::test]
async fn test_malformed_file_names_the_loader() {
    let tree = ConfigTree::new().with_file("application.json", "{ nope");
    let loader = FilePropertyLoader::new(tree.root());
    let err = loader.load_properties(&[]).await.unwrap_err();
    match err {
        Error::LoaderFailure { loader, source } => {
            assert!(loader.starts_with("File:"));
            assert!(source.to_string().contains("JSON"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
