//! Review rating.

use serde::{Deserialize, Serialize};

/// A review rating in stars, always within `1..=5`.
///
/// The only way to build one is [`Rating::new`] (or `TryFrom<i32>`), so a
/// `Rating` held anywhere in the code base has already been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    pub fn new(stars: i32) -> Result<Self, InvalidRating> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars as u8))
        } else {
            Err(InvalidRating(stars))
        }
    }

    pub fn get(self) -> i32 {
        i32::from(self.0)
    }
}

/// Rating outside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct InvalidRating(pub i32);

impl TryFrom<i32> for Rating {
    type Error = InvalidRating;

    fn try_from(stars: i32) -> Result<Self, Self::Error> {
        Self::new(stars)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.get()
    }
}

/// Arithmetic mean of the given ratings; `0.0` when there are none.
pub fn average(ratings: impl IntoIterator<Item = Rating>) -> f64 {
    let (sum, count) = ratings
        .into_iter()
        .fold((0i64, 0u64), |(sum, count), r| (sum + i64::from(r.get()), count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
