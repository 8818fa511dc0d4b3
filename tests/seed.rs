//! Seeder idempotence against the in-memory store.

use uuid::Uuid;

use rootcellar::audit::AuditStamp;
use rootcellar::models::vocab::{Color, FlavorNote, ServingContext};
use rootcellar::seed::{self, SEED_ACTOR};
use rootcellar::store::{DocumentStore, MemoryStore};

mod common;
use common::{fixed_clock, init_logging};

#[tokio::test]
async fn seeding_twice_inserts_once() {
    init_logging();
    let store = MemoryStore::new();
    let clock = fixed_clock();

    let first = seed::seed_defaults(&store, &clock).await.unwrap();
    assert_eq!(first.flavor_notes, 20);
    assert_eq!(first.colors, 5);
    assert_eq!(first.serving_contexts, 5);

    let second = seed::seed_defaults(&store, &clock).await.unwrap();
    assert_eq!(second, Default::default());

    assert_eq!(store.count::<FlavorNote>().await.unwrap(), 20);
    assert_eq!(store.count::<Color>().await.unwrap(), 5);
    assert_eq!(store.count::<ServingContext>().await.unwrap(), 5);
}

#[tokio::test]
async fn a_non_empty_vocabulary_is_left_alone() {
    init_logging();
    let store = MemoryStore::new();
    let clock = fixed_clock();

    // a curator already renamed their own color; seeding must not pile
    // the defaults on top of it
    let custom = Color {
        id: Uuid::new_v4(),
        name: "Cola Brown".into(),
        audit: AuditStamp::on_create(&clock, "curator@example.com"),
    };
    store.insert(custom.clone()).await.unwrap();

    let summary = seed::seed_defaults(&store, &clock).await.unwrap();
    assert_eq!(summary.colors, 0);
    assert_eq!(summary.flavor_notes, 20);
    assert_eq!(summary.serving_contexts, 5);

    let colors = store.find::<Color, _>(|_| true).await.unwrap();
    assert_eq!(colors, vec![custom]);
}

#[tokio::test]
async fn seeded_rows_are_stamped_by_the_system_actor() {
    init_logging();
    let store = MemoryStore::new();
    let clock = fixed_clock();

    seed::seed_defaults(&store, &clock).await.unwrap();

    let notes = store.find::<FlavorNote, _>(|_| true).await.unwrap();
    assert!(notes.iter().all(|n| n.audit.created_by == SEED_ACTOR));
    assert!(notes.iter().all(|n| n.audit.created_at == clock.0));

    let names: Vec<_> = notes.iter().map(|n| n.name.as_str()).collect();
    assert!(names.contains(&"Sassafras"));
    assert!(names.contains(&"Wintergreen"));
}
