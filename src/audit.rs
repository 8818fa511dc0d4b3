//! Audit stamping for every mutating operation.
//!
//! Every write to the store goes through an [`AuditStamp`], using a clock the
//! caller injects. Nothing else in the crate reads wall-clock time, so
//! aggregation and sorting stay reproducible under test.

use chrono::{DateTime, Utc};

/// The single authoritative time source for audit stamps.
///
/// Production callers hand over [`SystemClock`]; tests pin a fixed instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the actual system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Who touched a document, and when.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuditStamp {
    pub created_at: DateTime<Utc>,
    pub created_by: String,

    /// Matches `created_at`/`created_by` until the first mutation.
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

impl AuditStamp {
    /// Stamp for a document's first insert.
    pub fn on_create(clock: &dyn Clock, actor: &str) -> Self {
        let now = clock.now();
        Self {
            created_at: now,
            created_by: actor.to_string(),
            updated_at: now,
            updated_by: actor.to_string(),
        }
    }

    /// Re-stamp for a mutation. The `created_*` pair never changes again.
    pub fn on_update(&mut self, clock: &dyn Clock, actor: &str) {
        self.updated_at = clock.now();
        self.updated_by = actor.to_string();
    }
}
