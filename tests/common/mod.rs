//! Shared fixtures for the integration tests.

use chrono::{DateTime, TimeZone, Utc};

use rootcellar::audit::Clock;
use rootcellar::models::{ReviewDraft, RootBeerDraft};
use uuid::Uuid;

#[allow(dead_code, reason = "it's used in the other tests")]
pub const CURATOR: &str = "curator@example.com";

/// A clock pinned to one instant, so audit stamps are assertable.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[allow(dead_code, reason = "it's used in the other tests")]
pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
}

/// call this at the top of any new test func! :)
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[allow(dead_code, reason = "it's used in the other tests")]
pub fn root_beer_draft(name: &str, brand: &str) -> RootBeerDraft {
    RootBeerDraft {
        name: name.into(),
        brand: brand.into(),
        region: Some("Wisconsin".into()),
        country: Some("USA".into()),
        ingredients: vec!["carbonated water".into(), "cane sugar".into()],
        caffeinated: false,
        alcoholic: false,
        ..Default::default()
    }
}

#[allow(dead_code, reason = "it's used in the other tests")]
pub fn review_draft(root_beer_id: Uuid, sweetness: i64, overall: i64) -> ReviewDraft {
    ReviewDraft {
        root_beer_id,
        sweetness,
        carbonation_bite: 3,
        creaminess: 3,
        acidity: 2,
        aftertaste_length: 3,
        flavor_notes: vec![],
        tasting_notes: None,
        overall_score: overall,
        would_drink_again: true,
        uniqueness_score: None,
        review_date: Utc.with_ymd_and_hms(2025, 5, 20, 18, 0, 0).unwrap(),
        serving_context_id: None,
    }
}
