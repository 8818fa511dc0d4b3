//! One tasting session of one root beer.
//!
//! A review keeps three kinds of data strictly apart: quantified sensory
//! ratings (1-5, comparable across reviews), subjective opinion (1-10 scores
//! and a would-drink-again flag), and free text. The parent root beer is
//! referenced by id; a review never embeds it.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::audit::{AuditStamp, Clock};
use crate::error::{CellarError, FieldError, FieldIssue, ValidationError};
use crate::store::{Document, DocumentStore, REVIEWS};

use super::root_beer::RootBeer;
use super::vocab::VocabIndex;

/// A structured sensory rating on the 1-5 scale.
///
/// Values outside the scale are not representable; construction fails
/// instead of clamping, so a typo'd `0` never quietly becomes a `1`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SensoryRating(u8);

impl SensoryRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, FieldError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(FieldError::OutOfRange {
                min: Self::MIN as f64,
                max: Self::MAX as f64,
                got: value as f64,
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// A subjective score on the 1-10 scale (overall, uniqueness).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct OpinionScore(u8);

impl OpinionScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: i64) -> Result<Self, FieldError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(FieldError::OutOfRange {
                min: Self::MIN as f64,
                max: Self::MAX as f64,
                got: value as f64,
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Review {
    pub id: Uuid,

    /// The root beer this tasting belongs to. Many reviews, one product.
    pub root_beer_id: Uuid,

    // sensory ratings, 1-5
    pub sweetness: SensoryRating,
    pub carbonation_bite: SensoryRating,
    pub creaminess: SensoryRating,
    pub acidity: SensoryRating,
    pub aftertaste_length: SensoryRating,

    /// References into the flavor-note vocabulary. Set semantics; a note
    /// can't be picked twice.
    pub flavor_notes: BTreeSet<Uuid>,
    pub tasting_notes: Option<String>,

    // subjective opinion
    pub overall_score: OpinionScore,
    pub would_drink_again: bool,
    pub uniqueness_score: Option<OpinionScore>,

    pub review_date: DateTime<Utc>,
    pub serving_context_id: Option<Uuid>,

    pub audit: AuditStamp,
}

impl Document for Review {
    const COLLECTION: &'static str = REVIEWS;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Raw review fields as they come off a form, before validation.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct ReviewDraft {
    pub root_beer_id: Uuid,
    pub sweetness: i64,
    pub carbonation_bite: i64,
    pub creaminess: i64,
    pub acidity: i64,
    pub aftertaste_length: i64,
    pub flavor_notes: Vec<Uuid>,
    pub tasting_notes: Option<String>,
    pub overall_score: i64,
    pub would_drink_again: bool,
    pub uniqueness_score: Option<i64>,
    pub review_date: DateTime<Utc>,
    pub serving_context_id: Option<Uuid>,
}

/// The validated payload of a draft. Ready to be stamped and stored.
#[derive(Clone, Debug)]
pub struct ReviewAttrs {
    pub sweetness: SensoryRating,
    pub carbonation_bite: SensoryRating,
    pub creaminess: SensoryRating,
    pub acidity: SensoryRating,
    pub aftertaste_length: SensoryRating,
    pub flavor_notes: BTreeSet<Uuid>,
    pub tasting_notes: Option<String>,
    pub overall_score: OpinionScore,
    pub would_drink_again: bool,
    pub uniqueness_score: Option<OpinionScore>,
    pub review_date: DateTime<Utc>,
    pub serving_context_id: Option<Uuid>,
}

impl ReviewDraft {
    /// Checks every field and reports every failure at once.
    ///
    /// Pure: existing vocabulary ids come in through `index`, and nothing
    /// here touches the store.
    pub fn validate(&self, index: &VocabIndex) -> Result<ReviewAttrs, ValidationError> {
        let mut issues = Vec::new();

        let mut rating = |field: &'static str, value: i64| match SensoryRating::new(value) {
            Ok(r) => Some(r),
            Err(error) => {
                issues.push(FieldIssue { field, error });
                None
            }
        };

        let sweetness = rating("sweetness", self.sweetness);
        let carbonation_bite = rating("carbonation_bite", self.carbonation_bite);
        let creaminess = rating("creaminess", self.creaminess);
        let acidity = rating("acidity", self.acidity);
        let aftertaste_length = rating("aftertaste_length", self.aftertaste_length);

        let overall_score = match OpinionScore::new(self.overall_score) {
            Ok(s) => Some(s),
            Err(error) => {
                issues.push(FieldIssue {
                    field: "overall_score",
                    error,
                });
                None
            }
        };

        let uniqueness_score = match self.uniqueness_score {
            Some(value) => match OpinionScore::new(value) {
                Ok(s) => Some(Some(s)),
                Err(error) => {
                    issues.push(FieldIssue {
                        field: "uniqueness_score",
                        error,
                    });
                    None
                }
            },
            None => Some(None),
        };

        // dedupe first, then reject anything the vocabulary doesn't know.
        // a dangling reference is an error, never a silent drop.
        let flavor_notes: BTreeSet<Uuid> = self.flavor_notes.iter().copied().collect();
        for note_id in &flavor_notes {
            if !index.flavor_notes.contains(note_id) {
                issues.push(FieldIssue {
                    field: "flavor_notes",
                    error: FieldError::DanglingReference(*note_id),
                });
            }
        }

        if let Some(ctx_id) = self.serving_context_id {
            if !index.serving_contexts.contains(&ctx_id) {
                issues.push(FieldIssue {
                    field: "serving_context_id",
                    error: FieldError::DanglingReference(ctx_id),
                });
            }
        }

        // a None here always comes with a pushed issue
        let (
            Some(sweetness),
            Some(carbonation_bite),
            Some(creaminess),
            Some(acidity),
            Some(aftertaste_length),
            Some(overall_score),
            Some(uniqueness_score),
        ) = (
            sweetness,
            carbonation_bite,
            creaminess,
            acidity,
            aftertaste_length,
            overall_score,
            uniqueness_score,
        )
        else {
            return Err(ValidationError { issues });
        };

        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        Ok(ReviewAttrs {
            sweetness,
            carbonation_bite,
            creaminess,
            acidity,
            aftertaste_length,
            flavor_notes,
            tasting_notes: self.tasting_notes.clone(),
            overall_score,
            would_drink_again: self.would_drink_again,
            uniqueness_score,
            review_date: self.review_date,
            serving_context_id: self.serving_context_id,
        })
    }
}

impl Review {
    fn from_attrs(id: Uuid, root_beer_id: Uuid, attrs: ReviewAttrs, audit: AuditStamp) -> Self {
        Self {
            id,
            root_beer_id,
            sweetness: attrs.sweetness,
            carbonation_bite: attrs.carbonation_bite,
            creaminess: attrs.creaminess,
            acidity: attrs.acidity,
            aftertaste_length: attrs.aftertaste_length,
            flavor_notes: attrs.flavor_notes,
            tasting_notes: attrs.tasting_notes,
            overall_score: attrs.overall_score,
            would_drink_again: attrs.would_drink_again,
            uniqueness_score: attrs.uniqueness_score,
            review_date: attrs.review_date,
            serving_context_id: attrs.serving_context_id,
            audit,
        }
    }

    /// Records a new tasting. Curator-only surface.
    pub async fn create<S: DocumentStore>(
        store: &S,
        draft: &ReviewDraft,
        actor: &str,
        clock: &dyn Clock,
    ) -> Result<Self, CellarError> {
        if store.get::<RootBeer>(draft.root_beer_id).await?.is_none() {
            return Err(CellarError::RootBeerNotFound(draft.root_beer_id));
        }

        let index = VocabIndex::load(store).await?;
        let attrs = draft.validate(&index)?;

        let review = Self::from_attrs(
            Uuid::new_v4(),
            draft.root_beer_id,
            attrs,
            AuditStamp::on_create(clock, actor),
        );
        store.insert(review.clone()).await?;
        Ok(review)
    }

    /// Replaces a review's fields with a re-validated draft.
    ///
    /// The parent root beer cannot be swapped out here; a review belongs to
    /// the product it was recorded for.
    pub async fn update<S: DocumentStore>(
        store: &S,
        id: Uuid,
        draft: &ReviewDraft,
        actor: &str,
        clock: &dyn Clock,
    ) -> Result<Self, CellarError> {
        let existing = store
            .get::<Self>(id)
            .await?
            .ok_or(CellarError::ReviewNotFound(id))?;

        let index = VocabIndex::load(store).await?;
        let attrs = draft.validate(&index)?;

        let mut audit = existing.audit;
        audit.on_update(clock, actor);

        let review = Self::from_attrs(id, existing.root_beer_id, attrs, audit);
        store.replace(review.clone()).await?;
        Ok(review)
    }

    pub async fn delete<S: DocumentStore>(store: &S, id: Uuid) -> Result<(), CellarError> {
        if !store.remove::<Self>(id).await? {
            return Err(CellarError::ReviewNotFound(id));
        }
        Ok(())
    }

    /// Every review of one root beer.
    pub async fn for_root_beer<S: DocumentStore>(
        store: &S,
        root_beer_id: Uuid,
    ) -> Result<Vec<Self>, CellarError> {
        Ok(store
            .find::<Self, _>(|r| r.root_beer_id == root_beer_id)
            .await?)
    }
}
