//! The three reference vocabularies: flavor notes, colors, serving contexts.
//!
//! Vocabulary entries are referenced from root beers and reviews by id, never
//! embedded, so a curator can rename a label without touching anything that
//! points at it. The core never deletes a vocabulary entry on its own.

use std::collections::HashSet;

use uuid::Uuid;

use crate::audit::{AuditStamp, Clock};
use crate::error::{CellarError, FieldError, FieldIssue, ValidationError};
use crate::store::{Document, DocumentStore, COLORS, FLAVOR_NOTES, SERVING_CONTEXTS};

pub const MAX_LABEL_LEN: usize = 50;

/// Where a flavor note sits on the tasting wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FlavorCategory {
    Traditional,
    SweetCreamy,
    SpiceHerbal,
    Other,
}

impl FlavorCategory {
    /// Label as shown to visitors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Traditional => "Traditional",
            Self::SweetCreamy => "Sweet & Creamy",
            Self::SpiceHerbal => "Spice & Herbal",
            Self::Other => "Other",
        }
    }
}

/// A flavor characteristic a review can point at ("Vanilla", "Sassafras").
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlavorNote {
    pub id: Uuid,
    pub name: String,
    pub category: FlavorCategory,
    pub audit: AuditStamp,
}

/// A root beer pour color ("Amber", "Mahogany").
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub id: Uuid,
    pub name: String,
    pub audit: AuditStamp,
}

/// How a tasting was served ("Bottle", "Fountain").
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ServingContext {
    pub id: Uuid,
    pub name: String,
    pub audit: AuditStamp,
}

impl Document for FlavorNote {
    const COLLECTION: &'static str = FLAVOR_NOTES;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for Color {
    const COLLECTION: &'static str = COLORS;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for ServingContext {
    const COLLECTION: &'static str = SERVING_CONTEXTS;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Checks a vocabulary label: present, trimmed, within bounds.
fn validated_label(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    let error = if trimmed.is_empty() {
        Some(FieldError::Missing)
    } else if trimmed.chars().count() > MAX_LABEL_LEN {
        Some(FieldError::TooLong(MAX_LABEL_LEN))
    } else {
        None
    };

    match error {
        Some(error) => Err(ValidationError {
            issues: vec![FieldIssue {
                field: "name",
                error,
            }],
        }),
        None => Ok(trimmed.to_string()),
    }
}

impl FlavorNote {
    pub async fn create<S: DocumentStore>(
        store: &S,
        name: &str,
        category: FlavorCategory,
        actor: &str,
        clock: &dyn Clock,
    ) -> Result<Self, CellarError> {
        let note = Self {
            id: Uuid::new_v4(),
            name: validated_label(name)?,
            category,
            audit: AuditStamp::on_create(clock, actor),
        };
        store.insert(note.clone()).await?;
        Ok(note)
    }

    /// Renames the label in place. References keep working since they hold
    /// the id, not the label.
    pub async fn rename<S: DocumentStore>(
        store: &S,
        id: Uuid,
        name: &str,
        actor: &str,
        clock: &dyn Clock,
    ) -> Result<Self, CellarError> {
        let mut note = store
            .get::<Self>(id)
            .await?
            .ok_or(CellarError::VocabNotFound(id))?;
        note.name = validated_label(name)?;
        note.audit.on_update(clock, actor);
        store.replace(note.clone()).await?;
        Ok(note)
    }
}

impl Color {
    pub async fn create<S: DocumentStore>(
        store: &S,
        name: &str,
        actor: &str,
        clock: &dyn Clock,
    ) -> Result<Self, CellarError> {
        let color = Self {
            id: Uuid::new_v4(),
            name: validated_label(name)?,
            audit: AuditStamp::on_create(clock, actor),
        };
        store.insert(color.clone()).await?;
        Ok(color)
    }
}

impl ServingContext {
    pub async fn create<S: DocumentStore>(
        store: &S,
        name: &str,
        actor: &str,
        clock: &dyn Clock,
    ) -> Result<Self, CellarError> {
        let ctx = Self {
            id: Uuid::new_v4(),
            name: validated_label(name)?,
            audit: AuditStamp::on_create(clock, actor),
        };
        store.insert(ctx.clone()).await?;
        Ok(ctx)
    }
}

/// The id sets of all three vocabularies, loaded once per write so that
/// draft validation can stay a pure function.
#[derive(Clone, Debug, Default)]
pub struct VocabIndex {
    pub flavor_notes: HashSet<Uuid>,
    pub colors: HashSet<Uuid>,
    pub serving_contexts: HashSet<Uuid>,
}

impl VocabIndex {
    pub async fn load<S: DocumentStore>(store: &S) -> Result<Self, CellarError> {
        let flavor_notes = store.find::<FlavorNote, _>(|_| true).await?;
        let colors = store.find::<Color, _>(|_| true).await?;
        let serving_contexts = store.find::<ServingContext, _>(|_| true).await?;

        Ok(Self {
            flavor_notes: flavor_notes.into_iter().map(|n| n.id).collect(),
            colors: colors.into_iter().map(|c| c.id).collect(),
            serving_contexts: serving_contexts.into_iter().map(|c| c.id).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::audit::SystemClock;
    use crate::store::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn rename_keeps_id_stable() {
        let store = MemoryStore::new();
        let clock = SystemClock;

        let note = FlavorNote::create(&store, "Vanila", FlavorCategory::SweetCreamy, "curator", &clock)
            .await
            .unwrap();

        let renamed = FlavorNote::rename(&store, note.id, "Vanilla", "curator", &clock)
            .await
            .unwrap();

        assert_eq!(renamed.id, note.id);
        assert_eq!(renamed.name, "Vanilla");
        assert_eq!(renamed.audit.created_at, note.audit.created_at);
    }

    #[tokio::test]
    async fn blank_label_is_rejected() {
        let store = MemoryStore::new();
        let err = Color::create(&store, "   ", "curator", &SystemClock)
            .await
            .unwrap_err();

        let CellarError::Validation(v) = err else {
            panic!("expected validation error");
        };
        assert_eq!(v.issues[0].error, FieldError::Missing);
        assert_eq!(store.count::<Color>().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn overlong_label_is_rejected() {
        let store = MemoryStore::new();
        let err = ServingContext::create(&store, &"x".repeat(51), "curator", &SystemClock)
            .await
            .unwrap_err();

        let CellarError::Validation(v) = err else {
            panic!("expected validation error");
        };
        assert_eq!(v.issues[0].error, FieldError::TooLong(MAX_LABEL_LEN));
    }
}
