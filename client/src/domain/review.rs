//! Reviews, their ratings and the aggregate statistics shown on a bar page.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::validation::FieldErrors;
use crate::domain::{BarId, ReviewId, UserId};

/// Lowest accepted star rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted star rating.
pub const RATING_MAX: u8 = 5;
/// Minimum comment length in characters, after trimming.
pub const COMMENT_MIN: usize = 10;
/// Maximum comment length in characters.
pub const COMMENT_MAX: usize = 1000;

/// Validation failures for review input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// No star was selected.
    RatingRequired,
    /// Rating outside 1..=5.
    RatingOutOfRange,
    /// Comment shorter than [`COMMENT_MIN`].
    CommentTooShort,
    /// Comment longer than [`COMMENT_MAX`].
    CommentTooLong,
}

impl fmt::Display for ReviewValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RatingRequired => write!(f, "Please select a rating"),
            Self::RatingOutOfRange => {
                write!(f, "Rating must be between {RATING_MIN} and {RATING_MAX}")
            }
            Self::CommentTooShort => {
                write!(f, "Comment must be at least {COMMENT_MIN} characters")
            }
            Self::CommentTooLong => write!(f, "Comment must be at most {COMMENT_MAX} characters"),
        }
    }
}

impl std::error::Error for ReviewValidationError {}

/// Star rating between one and five inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Validate a raw star count.
    pub fn new(stars: u8) -> Result<Self, ReviewValidationError> {
        if (RATING_MIN..=RATING_MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(ReviewValidationError::RatingOutOfRange)
        }
    }

    /// Number of stars.
    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ReviewValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Raw review editor input. `rating` is `None` until a star is tapped.
#[derive(Debug, Clone, Default)]
pub struct ReviewInput {
    /// Selected star count.
    pub rating: Option<u8>,
    /// Comment text as typed.
    pub comment: String,
}

impl ReviewInput {
    /// Prefill the editor from an existing review.
    pub fn from_review(review: &Review) -> Self {
        Self {
            rating: Some(review.rating.stars()),
            comment: review.comment.clone(),
        }
    }
}

/// Validated rating and comment shared by create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewDraft {
    rating: Rating,
    comment: String,
}

impl ReviewDraft {
    /// Validate editor input field by field.
    pub fn try_from_input(input: &ReviewInput) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let rating = match input.rating {
            None => {
                errors.insert("rating", ReviewValidationError::RatingRequired);
                None
            }
            Some(stars) => Rating::new(stars)
                .map_err(|err| errors.insert("rating", err))
                .ok(),
        };

        let comment = input.comment.trim();
        let length = comment.chars().count();
        if length < COMMENT_MIN {
            errors.insert("comment", ReviewValidationError::CommentTooShort);
        } else if length > COMMENT_MAX {
            errors.insert("comment", ReviewValidationError::CommentTooLong);
        }

        match rating {
            Some(rating) => errors.into_result(|| Self {
                rating,
                comment: comment.to_owned(),
            }),
            None => Err(errors),
        }
    }

    /// Selected rating.
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Trimmed comment.
    pub fn comment(&self) -> &str {
        self.comment.as_str()
    }
}

/// Body of `POST reviews`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview<'a> {
    /// Reviewed bar.
    pub bar_id: &'a BarId,
    /// Validated rating and comment.
    #[serde(flatten)]
    pub draft: &'a ReviewDraft,
}

/// Author summary embedded in a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAuthor {
    /// Author id.
    #[serde(alias = "_id")]
    pub id: UserId,
    /// Author handle.
    #[serde(default)]
    pub username: String,
}

/// Review as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review id.
    #[serde(alias = "_id")]
    pub id: ReviewId,
    /// Reviewed bar.
    #[serde(alias = "bar")]
    pub bar_id: BarId,
    /// Author.
    #[serde(alias = "user")]
    pub author: ReviewAuthor,
    /// Star rating.
    pub rating: Rating,
    /// Comment text.
    pub comment: String,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Whether `user` wrote this review.
    pub fn is_authored_by(&self, user: &UserId) -> bool {
        &self.author.id == user
    }
}

/// Aggregated ratings for a bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    /// Mean rating, `0.0` when there are no reviews.
    #[serde(default, alias = "averageRating")]
    pub average: f64,
    /// Number of reviews.
    #[serde(default, alias = "totalReviews")]
    pub total: u32,
    /// Review counts indexed by star, `histogram[0]` counting one-star reviews.
    #[serde(default, alias = "ratingDistribution")]
    pub histogram: [u32; 5],
}

impl ReviewStats {
    /// Compute statistics from a list of reviews.
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Self {
        let mut histogram = [0_u32; 5];
        let mut sum = 0_u32;
        let mut total = 0_u32;
        for review in reviews {
            let stars = review.rating.stars();
            if let Some(slot) = histogram.get_mut(usize::from(stars - RATING_MIN)) {
                *slot += 1;
            }
            sum += u32::from(stars);
            total += 1;
        }
        let average = if total == 0 {
            0.0
        } else {
            f64::from(sum) / f64::from(total)
        };
        Self {
            average,
            total,
            histogram,
        }
    }
}
