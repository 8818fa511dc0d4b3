//! The product itself: objective, measurable facts about one root beer.
//!
//! Everything here is observable without tasting. Anything that needs a
//! palate belongs on [`Review`](super::review::Review).

use uuid::Uuid;

use crate::audit::{AuditStamp, Clock};
use crate::error::{CellarError, FieldError, FieldIssue, ValidationError};
use crate::images::ImageStore;
use crate::store::{Document, DocumentStore, ROOTBEERS};

use super::review::Review;
use super::vocab::VocabIndex;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_BRAND_LEN: usize = 100;
pub const MAX_PLACE_LEN: usize = 100;
pub const MAX_CO2_VOLUMES: f64 = 10.0;

/// What the recipe is sweetened with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Sweetener {
    CaneSugar,
    HighFructoseCornSyrup,
    Honey,
    Maple,
    Stevia,
    Other,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum CarbonationLevel {
    Low,
    Medium,
    High,
}

/// A pointer into the image bucket. The bytes stay over there.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageRef {
    pub url: String,

    /// Featured image flag. At most one per product.
    pub primary: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RootBeer {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub region: Option<String>,
    pub country: Option<String>,

    /// Ordered as printed on the label.
    pub ingredients: Vec<String>,
    pub sweetener: Option<Sweetener>,
    pub sugar_grams_per_serving: Option<f64>,
    pub caffeinated: bool,
    pub alcoholic: bool,

    /// Reference into the color vocabulary.
    pub color_id: Option<Uuid>,
    pub carbonation: Option<CarbonationLevel>,
    pub estimated_co2_volumes: Option<f64>,

    pub notes: Option<String>,
    pub images: Vec<ImageRef>,

    pub audit: AuditStamp,
}

impl Document for RootBeer {
    const COLLECTION: &'static str = ROOTBEERS;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl RootBeer {
    /// The featured image, if any.
    ///
    /// When images exist but none carries the flag, the first one stands in.
    pub fn primary_image(&self) -> Option<&ImageRef> {
        self.images
            .iter()
            .find(|img| img.primary)
            .or_else(|| self.images.first())
    }
}

/// Raw product fields as they come off the curator's form.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RootBeerDraft {
    pub name: String,
    pub brand: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub ingredients: Vec<String>,
    pub sweetener: Option<Sweetener>,
    pub sugar_grams_per_serving: Option<f64>,
    pub caffeinated: bool,
    pub alcoholic: bool,
    pub color_id: Option<Uuid>,
    pub carbonation: Option<CarbonationLevel>,
    pub estimated_co2_volumes: Option<f64>,
    pub notes: Option<String>,
    pub images: Vec<ImageRef>,
}

impl RootBeerDraft {
    /// Checks every field and reports every failure at once. Pure.
    pub fn validate(&self, index: &VocabIndex) -> Result<Self, ValidationError> {
        let mut issues = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            issues.push(FieldIssue {
                field: "name",
                error: FieldError::Missing,
            });
        } else if name.chars().count() > MAX_NAME_LEN {
            issues.push(FieldIssue {
                field: "name",
                error: FieldError::TooLong(MAX_NAME_LEN),
            });
        }

        let brand = self.brand.trim();
        if brand.is_empty() {
            issues.push(FieldIssue {
                field: "brand",
                error: FieldError::Missing,
            });
        } else if brand.chars().count() > MAX_BRAND_LEN {
            issues.push(FieldIssue {
                field: "brand",
                error: FieldError::TooLong(MAX_BRAND_LEN),
            });
        }

        for (field, value) in [("region", &self.region), ("country", &self.country)] {
            if let Some(v) = value {
                if v.chars().count() > MAX_PLACE_LEN {
                    issues.push(FieldIssue {
                        field,
                        error: FieldError::TooLong(MAX_PLACE_LEN),
                    });
                }
            }
        }

        if self.sugar_grams_per_serving.is_some_and(|g| g < 0.0) {
            issues.push(FieldIssue {
                field: "sugar_grams_per_serving",
                error: FieldError::Negative,
            });
        }

        if let Some(co2) = self.estimated_co2_volumes {
            if co2 < 0.0 {
                issues.push(FieldIssue {
                    field: "estimated_co2_volumes",
                    error: FieldError::Negative,
                });
            } else if co2 > MAX_CO2_VOLUMES {
                issues.push(FieldIssue {
                    field: "estimated_co2_volumes",
                    error: FieldError::OutOfRange {
                        min: 0.0,
                        max: MAX_CO2_VOLUMES,
                        got: co2,
                    },
                });
            }
        }

        if let Some(color_id) = self.color_id {
            if !index.colors.contains(&color_id) {
                issues.push(FieldIssue {
                    field: "color_id",
                    error: FieldError::DanglingReference(color_id),
                });
            }
        }

        if self.images.iter().filter(|img| img.primary).count() > 1 {
            issues.push(FieldIssue {
                field: "images",
                error: FieldError::MultiplePrimaryImages,
            });
        }

        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        Ok(Self {
            name: name.to_string(),
            brand: brand.to_string(),
            ingredients: self
                .ingredients
                .iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
            ..self.clone()
        })
    }
}

impl RootBeer {
    /// Adds a product to the catalog. Curator-only surface.
    pub async fn create<S: DocumentStore>(
        store: &S,
        draft: &RootBeerDraft,
        actor: &str,
        clock: &dyn Clock,
    ) -> Result<Self, CellarError> {
        let index = VocabIndex::load(store).await?;
        let draft = draft.validate(&index)?;

        let root_beer = Self {
            id: Uuid::new_v4(),
            name: draft.name,
            brand: draft.brand,
            region: draft.region,
            country: draft.country,
            ingredients: draft.ingredients,
            sweetener: draft.sweetener,
            sugar_grams_per_serving: draft.sugar_grams_per_serving,
            caffeinated: draft.caffeinated,
            alcoholic: draft.alcoholic,
            color_id: draft.color_id,
            carbonation: draft.carbonation,
            estimated_co2_volumes: draft.estimated_co2_volumes,
            notes: draft.notes,
            images: draft.images,
            audit: AuditStamp::on_create(clock, actor),
        };
        store.insert(root_beer.clone()).await?;
        Ok(root_beer)
    }

    /// Replaces a product's facts with a re-validated draft.
    ///
    /// Images are managed through the image operations below; whatever the
    /// draft says about them is ignored here.
    pub async fn update<S: DocumentStore>(
        store: &S,
        id: Uuid,
        draft: &RootBeerDraft,
        actor: &str,
        clock: &dyn Clock,
    ) -> Result<Self, CellarError> {
        let existing = store
            .get::<Self>(id)
            .await?
            .ok_or(CellarError::RootBeerNotFound(id))?;

        let index = VocabIndex::load(store).await?;
        let draft = draft.validate(&index)?;

        let mut audit = existing.audit;
        audit.on_update(clock, actor);

        let root_beer = Self {
            id,
            name: draft.name,
            brand: draft.brand,
            region: draft.region,
            country: draft.country,
            ingredients: draft.ingredients,
            sweetener: draft.sweetener,
            sugar_grams_per_serving: draft.sugar_grams_per_serving,
            caffeinated: draft.caffeinated,
            alcoholic: draft.alcoholic,
            color_id: draft.color_id,
            carbonation: draft.carbonation,
            estimated_co2_volumes: draft.estimated_co2_volumes,
            notes: draft.notes,
            images: existing.images,
            audit,
        };
        store.replace(root_beer.clone()).await?;
        Ok(root_beer)
    }

    /// Deletes a product and all of its reviews.
    ///
    /// Children go first, parent last. A store failure at any step fails
    /// the whole operation; there is no partial success to report.
    pub async fn delete<S: DocumentStore>(store: &S, id: Uuid) -> Result<(), CellarError> {
        if store.get::<Self>(id).await?.is_none() {
            return Err(CellarError::RootBeerNotFound(id));
        }

        let reviews = Review::for_root_beer(store, id).await?;
        let review_count = reviews.len();
        for review in reviews {
            store.remove::<Review>(review.id).await?;
        }
        store.remove::<Self>(id).await?;

        tracing::debug!("Deleted root beer `{id}` and {review_count} review(s).");
        Ok(())
    }

    /// Uploads a photo and attaches its descriptor.
    ///
    /// The first image of a product becomes its primary automatically.
    pub async fn attach_upload<S: DocumentStore, I: ImageStore>(
        store: &S,
        images: &I,
        id: Uuid,
        bytes: &[u8],
        content_type: &str,
        actor: &str,
        clock: &dyn Clock,
    ) -> Result<String, CellarError> {
        let mut root_beer = store
            .get::<Self>(id)
            .await?
            .ok_or(CellarError::RootBeerNotFound(id))?;

        let url = images.upload(bytes, content_type).await?;

        let primary = root_beer.images.is_empty();
        root_beer.images.push(ImageRef {
            url: url.clone(),
            primary,
        });
        root_beer.audit.on_update(clock, actor);
        store.replace(root_beer).await?;
        Ok(url)
    }

    /// Flags `url` as the featured image, unflagging the rest.
    pub async fn set_primary_image<S: DocumentStore>(
        store: &S,
        id: Uuid,
        url: &str,
        actor: &str,
        clock: &dyn Clock,
    ) -> Result<(), CellarError> {
        let mut root_beer = store
            .get::<Self>(id)
            .await?
            .ok_or(CellarError::RootBeerNotFound(id))?;

        if !root_beer.images.iter().any(|img| img.url == url) {
            return Err(CellarError::ImageNotFound(url.to_string()));
        }

        for img in &mut root_beer.images {
            img.primary = img.url == url;
        }
        root_beer.audit.on_update(clock, actor);
        store.replace(root_beer).await?;
        Ok(())
    }

    /// Detaches an image descriptor and asks the bucket to drop the object.
    ///
    /// A bucket failure is logged and swallowed; the database update always
    /// goes through. Removing the primary promotes the first remaining
    /// image.
    pub async fn remove_image<S: DocumentStore, I: ImageStore>(
        store: &S,
        images: &I,
        id: Uuid,
        url: &str,
        actor: &str,
        clock: &dyn Clock,
    ) -> Result<(), CellarError> {
        let mut root_beer = store
            .get::<Self>(id)
            .await?
            .ok_or(CellarError::RootBeerNotFound(id))?;

        let Some(pos) = root_beer.images.iter().position(|img| img.url == url) else {
            return Err(CellarError::ImageNotFound(url.to_string()));
        };

        if let Err(e) = images.delete(url).await {
            tracing::warn!(
                "Image store failed to delete `{url}`; continuing with the database update. err: {e}"
            );
        }

        let removed = root_beer.images.remove(pos);
        if removed.primary {
            if let Some(first) = root_beer.images.first_mut() {
                first.primary = true;
            }
        }
        root_beer.audit.on_update(clock, actor);
        store.replace(root_beer).await?;
        Ok(())
    }
}
