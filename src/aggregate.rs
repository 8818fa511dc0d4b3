//! Reduces a product's reviews into one comparable sensory vector.
//!
//! The profile backs the per-product radar chart, so it has to be a pure
//! function of the review set: same reviews in, bit-identical numbers out.

use serde::Serialize;

use crate::models::Review;

/// Rounds to one decimal place, ties to even.
///
/// Matches the presentation rounding used everywhere a mean is shown, so a
/// recomputed chart never differs from a stored one by a trailing digit.
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// The averaged five-dimension sensory vector of one product, plus its
/// overall-score mean.
///
/// Only ever built from at least one review. "No reviews yet" is a missing
/// profile, never a profile full of zeros.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SensoryProfile {
    pub sweetness: f64,
    pub carbonation_bite: f64,
    pub creaminess: f64,
    pub acidity: f64,
    pub aftertaste_length: f64,

    /// Mean of the 1-10 overall scores. Sort key for the catalog's
    /// average-score ordering.
    pub overall: f64,

    pub review_count: usize,
}

impl SensoryProfile {
    /// Averages a review set. `None` when there is nothing to average.
    pub fn of(reviews: &[Review]) -> Option<Self> {
        if reviews.is_empty() {
            return None;
        }

        let n = reviews.len() as f64;
        let mean = |dim: fn(&Review) -> u8| {
            round1(reviews.iter().map(|r| dim(r) as f64).sum::<f64>() / n)
        };

        Some(Self {
            sweetness: mean(|r| r.sweetness.get()),
            carbonation_bite: mean(|r| r.carbonation_bite.get()),
            creaminess: mean(|r| r.creaminess.get()),
            acidity: mean(|r| r.acidity.get()),
            aftertaste_length: mean(|r| r.aftertaste_length.get()),
            overall: mean(|r| r.overall_score.get()),
            review_count: reviews.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::audit::{AuditStamp, SystemClock};
    use crate::models::review::{OpinionScore, SensoryRating};

    use super::*;

    fn review(sweetness: i64, overall: i64) -> Review {
        review_full([sweetness, 3, 3, 3, 3], overall)
    }

    fn review_full(sensory: [i64; 5], overall: i64) -> Review {
        Review {
            id: Uuid::new_v4(),
            root_beer_id: Uuid::nil(),
            sweetness: SensoryRating::new(sensory[0]).unwrap(),
            carbonation_bite: SensoryRating::new(sensory[1]).unwrap(),
            creaminess: SensoryRating::new(sensory[2]).unwrap(),
            acidity: SensoryRating::new(sensory[3]).unwrap(),
            aftertaste_length: SensoryRating::new(sensory[4]).unwrap(),
            flavor_notes: Default::default(),
            tasting_notes: None,
            overall_score: OpinionScore::new(overall).unwrap(),
            would_drink_again: true,
            uniqueness_score: None,
            review_date: Utc::now(),
            serving_context_id: None,
            audit: AuditStamp::on_create(&SystemClock, "test"),
        }
    }

    #[test]
    fn empty_set_has_no_profile() {
        assert_eq!(SensoryProfile::of(&[]), None);
    }

    #[test]
    fn single_review_reports_raw_values() {
        let profile = SensoryProfile::of(&[review_full([4, 2, 5, 1, 3], 9)]).unwrap();
        assert_eq!(profile.sweetness, 4.0);
        assert_eq!(profile.carbonation_bite, 2.0);
        assert_eq!(profile.creaminess, 5.0);
        assert_eq!(profile.acidity, 1.0);
        assert_eq!(profile.aftertaste_length, 3.0);
        assert_eq!(profile.overall, 9.0);
        assert_eq!(profile.review_count, 1);
    }

    /// The Sprecher pair: sweetness 4 & 2 average to 3.0, overall 8 & 6 to 7.0.
    #[test]
    fn two_reviews_average() {
        let reviews = [review(4, 8), review(2, 6)];
        let profile = SensoryProfile::of(&reviews).unwrap();
        assert_eq!(profile.sweetness, 3.0);
        assert_eq!(profile.overall, 7.0);
        assert_eq!(profile.review_count, 2);
    }

    #[test]
    fn rounding_is_half_to_even() {
        // 1, 2, 2 -> 5/3 = 1.666... -> 1.7
        let p = SensoryProfile::of(&[review(1, 1), review(2, 2), review(2, 2)]).unwrap();
        assert_eq!(p.sweetness, 1.7);

        // .25 ties: 4.25 -> 4.2 (down to even), 4.75 -> 4.8 (up to even)
        let p = SensoryProfile::of(&[
            review(4, 4),
            review(4, 5),
            review(4, 5),
            review(5, 5),
        ])
        .unwrap();
        assert_eq!(p.sweetness, 4.2);
        assert_eq!(p.overall, 4.8);
    }

    #[test]
    fn identical_input_gives_bit_identical_output() {
        let reviews = [
            review_full([4, 3, 2, 5, 1], 7),
            review_full([1, 2, 3, 4, 5], 3),
            review_full([5, 5, 4, 2, 2], 10),
        ];
        assert_eq!(
            SensoryProfile::of(&reviews),
            SensoryProfile::of(&reviews.to_vec())
        );
    }
}
