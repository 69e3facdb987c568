//! Types for the recommendation engine

use serde::{Deserialize, Serialize};

use crate::domain::book::{BookRecord, Genre};

/// Which pass of the engine produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Drawn from the mood/time-of-day and reading-goal genre tables
    ContextMatch,
    /// Drawn from a genre already present in the cart
    CartSimilarity,
}

/// A suggested book with the bucket it came from and a shopper-facing reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub book: BookRecord,
    pub genre: Genre,
    pub reason: String,
    pub source: RecommendationSource,
}

/// Per-pass caps applied by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationLimits {
    /// Maximum recommendations returned
    pub limit: usize,
    /// Books taken from each context genre
    pub per_genre: usize,
    /// Books taken from each genre already in the cart
    pub per_cart_genre: usize,
    /// Books listed as "you may also like" on a book detail page
    pub similar_limit: usize,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            limit: super::DEFAULT_LIMIT,
            per_genre: super::PER_GENRE,
            per_cart_genre: super::PER_CART_GENRE,
            similar_limit: super::SIMILAR_LIMIT,
        }
    }
}
