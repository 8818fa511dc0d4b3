//! Entity schemas: the shapes the store holds and the validation that
//! guards them.

pub mod review;
pub mod root_beer;
pub mod vocab;

pub use review::{OpinionScore, Review, ReviewDraft, SensoryRating};
pub use root_beer::{CarbonationLevel, ImageRef, RootBeer, RootBeerDraft, Sweetener};
pub use vocab::{Color, FlavorCategory, FlavorNote, ServingContext, VocabIndex};
