//! Answers "list root beers matching criteria, sorted, paginated."
//!
//! Every call recomputes sensory profiles from the stored review set for
//! the whole collection before filtering, so the ordering basis is the same
//! no matter which page is asked for. Small collections make recomputation
//! cheaper than cache invalidation.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::aggregate::SensoryProfile;
use crate::config::CONFIG;
use crate::error::CellarError;
use crate::models::{Review, RootBeer};
use crate::store::DocumentStore;

/// The page sizes a caller may ask for. Anything else falls back to the
/// configured default rather than erroring.
pub const ALLOWED_PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// What to order the catalog by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub enum SortKey {
    #[default]
    Name,
    Brand,
    /// The overall-score mean from the sensory aggregator. Products without
    /// reviews always come last; ties break by name ascending.
    AverageScore,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// One catalog request: filters, ordering, and the page wanted.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct CatalogQuery {
    /// Exact brand match.
    pub brand: Option<String>,

    /// Exact match against a product's region, or failing that its country.
    pub region: Option<String>,

    /// Hide products that have no reviews yet (the public listing does).
    pub reviewed_only: bool,

    pub sort: SortKey,
    pub order: SortOrder,

    /// 1-based. Zero is treated as page one.
    pub page: u32,

    /// Must be one of [`ALLOWED_PAGE_SIZES`]; anything else resolves to
    /// the configured default.
    pub per_page: Option<u32>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            brand: None,
            region: None,
            reviewed_only: false,
            sort: SortKey::default(),
            order: SortOrder::default(),
            page: 1,
            per_page: None,
        }
    }
}

/// A root beer with its aggregated sensory data attached.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CatalogEntry {
    pub root_beer: RootBeer,

    /// `None` means "no reviews yet", which is not the same thing as
    /// reviews with low scores.
    pub profile: Option<SensoryProfile>,

    pub latest_review_date: Option<DateTime<Utc>>,
}

/// One page of the catalog.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CatalogPage {
    pub entries: Vec<CatalogEntry>,
    pub total_items: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// Resolves a requested page size against the allowed set. Anything
/// unlisted or absent becomes `default`.
pub fn resolve_page_size(requested: Option<u32>, default: u32) -> u32 {
    match requested {
        Some(n) if ALLOWED_PAGE_SIZES.contains(&n) => n,
        _ => default,
    }
}

/// The configured default page size. Before the embedding app initializes
/// the config, the built-in [`DEFAULT_PAGE_SIZE`] stands in.
async fn default_page_size() -> u32 {
    match CONFIG.get() {
        Some(config) => config.read().await.default_page_size,
        None => DEFAULT_PAGE_SIZE,
    }
}

fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Runs one catalog query: aggregate everything, then filter, sort,
/// paginate, in that order, every time.
pub async fn list<S: DocumentStore>(
    store: &S,
    query: &CatalogQuery,
) -> Result<CatalogPage, CellarError> {
    let root_beers = store.find::<RootBeer, _>(|_| true).await?;
    let reviews = store.find::<Review, _>(|_| true).await?;
    tracing::debug!(
        "Catalog query over {} product(s), {} review(s): {query:?}",
        root_beers.len(),
        reviews.len()
    );

    let mut by_product: HashMap<Uuid, Vec<Review>> = HashMap::new();
    for review in reviews {
        by_product.entry(review.root_beer_id).or_default().push(review);
    }

    // aggregate before filtering so every page shares one ordering basis
    let mut entries: Vec<CatalogEntry> = root_beers
        .into_iter()
        .map(|rb| {
            let product_reviews = by_product.get(&rb.id).map(Vec::as_slice).unwrap_or(&[]);
            CatalogEntry {
                profile: SensoryProfile::of(product_reviews),
                latest_review_date: product_reviews.iter().map(|r| r.review_date).max(),
                root_beer: rb,
            }
        })
        .collect();

    entries.retain(|entry| {
        if let Some(brand) = &query.brand {
            if entry.root_beer.brand != *brand {
                return false;
            }
        }
        if let Some(region) = &query.region {
            let matches_region = entry.root_beer.region.as_deref() == Some(region)
                || entry.root_beer.country.as_deref() == Some(region);
            if !matches_region {
                return false;
            }
        }
        if query.reviewed_only && entry.profile.is_none() {
            return false;
        }
        true
    });

    sort_entries(&mut entries, query.sort, query.order);

    let total_items = entries.len() as u64;
    let per_page = resolve_page_size(query.per_page, default_page_size().await);
    let total_pages = (total_items.div_ceil(per_page as u64) as u32).max(1);
    let page = query.page.max(1);

    if page > total_pages {
        return Err(CellarError::InvalidPage {
            requested: page,
            total_pages,
        });
    }

    let start = ((page - 1) * per_page) as usize;
    let end = (start + per_page as usize).min(entries.len());
    let entries = entries[start..end].to_vec();

    Ok(CatalogPage {
        entries,
        total_items,
        page,
        per_page,
        total_pages,
    })
}

/// Sorts with deterministic page boundaries: after the requested key, ties
/// always fall back to name ascending, then id.
fn sort_entries(entries: &mut [CatalogEntry], sort: SortKey, order: SortOrder) {
    let directed = |ord: Ordering| match order {
        SortOrder::Ascending => ord,
        SortOrder::Descending => ord.reverse(),
    };

    entries.sort_by(|a, b| {
        let primary = match sort {
            SortKey::Name => directed(cmp_ci(&a.root_beer.name, &b.root_beer.name)),
            SortKey::Brand => directed(cmp_ci(&a.root_beer.brand, &b.root_beer.brand)),
            SortKey::AverageScore => match (&a.profile, &b.profile) {
                // unreviewed products sort last in both directions
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(pa), Some(pb)) => directed(pa.overall.total_cmp(&pb.overall)),
            },
        };

        primary
            .then_with(|| cmp_ci(&a.root_beer.name, &b.root_beer.name))
            .then_with(|| a.root_beer.id.cmp(&b.root_beer.id))
    });
}
