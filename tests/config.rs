//! Config loading, the seeding bootstrap hook, and config-driven paging.

use temp_dir::TempDir;

use rootcellar::catalog::{self, CatalogQuery};
use rootcellar::config::{Config, CONFIG_FILE_NAME};
use rootcellar::error::ConfigError;
use rootcellar::models::vocab::FlavorNote;
use rootcellar::models::RootBeer;
use rootcellar::seed;
use rootcellar::store::{DocumentStore, MemoryStore};

mod common;
use common::{fixed_clock, init_logging, root_beer_draft, CURATOR};

// the config is a process-wide singleton: every test in this binary that
// initializes it must hand over the same value, since the first one wins
fn shared_config() -> Config {
    Config {
        default_page_size: 50,
        seed_on_startup: false,
        ..Default::default()
    }
}

#[tokio::test]
async fn config_round_trips_through_disk() {
    init_logging();
    let dir = TempDir::new().unwrap();

    let config = Config {
        data_dir: dir.path().to_path_buf(),
        site_name: "Frosty Mug Files".into(),
        default_page_size: 50,
        seed_on_startup: false,
    };

    let serialized = toml::to_string_pretty(&config).unwrap();
    tokio::fs::write(dir.child(CONFIG_FILE_NAME), serialized)
        .await
        .unwrap();

    let loaded = Config::from_disk(dir.path().to_path_buf()).await.unwrap();
    assert_eq!(loaded, config);
}

#[tokio::test]
async fn a_missing_config_file_is_a_read_error() {
    init_logging();
    let dir = TempDir::new().unwrap();

    let err = Config::from_disk(dir.path().to_path_buf())
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));
}

#[tokio::test]
async fn a_mangled_config_file_is_a_parse_error() {
    init_logging();
    let dir = TempDir::new().unwrap();
    tokio::fs::write(dir.child(CONFIG_FILE_NAME), "site_name = [not toml")
        .await
        .unwrap();

    let err = Config::from_disk(dir.path().to_path_buf())
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::ParseFailed(_)));
}

#[tokio::test]
async fn bootstrap_respects_the_seeding_switch() {
    init_logging();
    let store = MemoryStore::new();
    let clock = fixed_clock();

    Config::init(shared_config()).await;

    let summary = seed::bootstrap(&store, &clock).await.unwrap();
    assert_eq!(summary, Default::default());
    assert_eq!(store.count::<FlavorNote>().await.unwrap(), 0);
}

#[tokio::test]
async fn catalog_falls_back_to_the_configured_page_size() {
    init_logging();
    let store = MemoryStore::new();
    let clock = fixed_clock();

    Config::init(shared_config()).await;

    for i in 1..=30 {
        let draft = root_beer_draft(&format!("Root {i:02}"), "Fixture Brewing");
        RootBeer::create(&store, &draft, CURATOR, &clock)
            .await
            .unwrap();
    }

    // no page size asked for: the configured 50 applies, not the built-in 20
    let result = catalog::list(&store, &CatalogQuery::default()).await.unwrap();
    assert_eq!(result.per_page, 50);
    assert_eq!(result.entries.len(), 30);
    assert_eq!(result.total_pages, 1);

    // an unlisted page size resolves to the same configured default
    let result = catalog::list(
        &store,
        &CatalogQuery {
            per_page: Some(999),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(result.per_page, 50);

    // an allowed page size still wins over the default
    let result = catalog::list(
        &store,
        &CatalogQuery {
            per_page: Some(10),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(result.per_page, 10);
    assert_eq!(result.entries.len(), 10);
    assert_eq!(result.total_pages, 3);
}
