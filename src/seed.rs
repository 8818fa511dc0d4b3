//! Startup seeding for the three reference vocabularies.
//!
//! Idempotence comes from checking that a collection is empty, not from
//! upserting individual rows. Two processes cold-starting at once can both
//! see an empty collection and both insert; that race is accepted rather
//! than buying a distributed lock for a once-per-deployment operation.

use uuid::Uuid;

use crate::audit::{AuditStamp, Clock};
use crate::config::Config;
use crate::error::CellarError;
use crate::models::vocab::{Color, FlavorCategory, FlavorNote, ServingContext};
use crate::store::DocumentStore;

/// Actor recorded on seeded rows.
pub const SEED_ACTOR: &str = "system";

/// The default flavor-note vocabulary: 20 notes across the four categories.
pub const DEFAULT_FLAVOR_NOTES: [(&str, FlavorCategory); 20] = [
    ("Sassafras", FlavorCategory::Traditional),
    ("Sarsaparilla", FlavorCategory::Traditional),
    ("Wintergreen", FlavorCategory::Traditional),
    ("Licorice", FlavorCategory::Traditional),
    ("Anise", FlavorCategory::Traditional),
    ("Birch", FlavorCategory::Traditional),
    ("Vanilla", FlavorCategory::SweetCreamy),
    ("Caramel", FlavorCategory::SweetCreamy),
    ("Molasses", FlavorCategory::SweetCreamy),
    ("Honey", FlavorCategory::SweetCreamy),
    ("Marshmallow", FlavorCategory::SweetCreamy),
    ("Clove", FlavorCategory::SpiceHerbal),
    ("Cinnamon", FlavorCategory::SpiceHerbal),
    ("Nutmeg", FlavorCategory::SpiceHerbal),
    ("Allspice", FlavorCategory::SpiceHerbal),
    ("Ginger", FlavorCategory::SpiceHerbal),
    ("Citrus peel", FlavorCategory::Other),
    ("Medicinal", FlavorCategory::Other),
    ("Earthy", FlavorCategory::Other),
    ("Peppery", FlavorCategory::Other),
];

/// The default pour colors.
pub const DEFAULT_COLORS: [&str; 5] = ["Amber", "Brown", "Dark Brown", "Black", "Mahogany"];

/// The default serving contexts.
pub const DEFAULT_SERVING_CONTEXTS: [&str; 5] = ["Bottle", "Can", "Tap", "Fountain", "Growler"];

/// How many rows each vocabulary received during one seeding pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub flavor_notes: usize,
    pub colors: usize,
    pub serving_contexts: usize,
}

/// Ensures each vocabulary is non-empty, inserting the full default batch
/// into any that isn't. Safe to call on every startup.
pub async fn seed_defaults<S: DocumentStore>(
    store: &S,
    clock: &dyn Clock,
) -> Result<SeedSummary, CellarError> {
    let mut summary = SeedSummary::default();

    if store.count::<FlavorNote>().await? == 0 {
        for (name, category) in DEFAULT_FLAVOR_NOTES {
            store
                .insert(FlavorNote {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    category,
                    audit: AuditStamp::on_create(clock, SEED_ACTOR),
                })
                .await?;
            summary.flavor_notes += 1;
        }
        tracing::info!("Seeded {} flavor notes.", summary.flavor_notes);
    }

    if store.count::<Color>().await? == 0 {
        for name in DEFAULT_COLORS {
            store
                .insert(Color {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    audit: AuditStamp::on_create(clock, SEED_ACTOR),
                })
                .await?;
            summary.colors += 1;
        }
        tracing::info!("Seeded {} colors.", summary.colors);
    }

    if store.count::<ServingContext>().await? == 0 {
        for name in DEFAULT_SERVING_CONTEXTS {
            store
                .insert(ServingContext {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    audit: AuditStamp::on_create(clock, SEED_ACTOR),
                })
                .await?;
            summary.serving_contexts += 1;
        }
        tracing::info!("Seeded {} serving contexts.", summary.serving_contexts);
    }

    Ok(summary)
}

/// Startup hook: runs the seeder if the config asks for it.
///
/// Call once per process, after [`Config::init`](crate::config::Config::init).
pub async fn bootstrap<S: DocumentStore>(
    store: &S,
    clock: &dyn Clock,
) -> Result<SeedSummary, CellarError> {
    let (seed_on_startup, site_name) = {
        let config = Config::read().await;
        (config.seed_on_startup, config.site_name.clone())
    };

    if !seed_on_startup {
        tracing::debug!("Seeding on startup is disabled for `{site_name}`.");
        return Ok(SeedSummary::default());
    }

    seed_defaults(store, clock).await
}
