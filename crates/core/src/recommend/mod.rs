//! Context-aware book recommendations
//!
//! Picks books from genres matched to the shopper's mood, time of day and
//! reading goal, then tops up with books from genres already in the cart.
//! Output is deterministic for identical inputs.

mod engine;
pub mod tables;
mod types;

pub use engine::{recommend, similar_books, RecommendationEngine};
pub use types::*;

/// Maximum recommendations returned by default
pub const DEFAULT_LIMIT: usize = 6;

/// Books taken from each context genre
pub const PER_GENRE: usize = 2;

/// Books taken from each genre already in the cart
pub const PER_CART_GENRE: usize = 1;

/// Books listed on a detail page as similar titles
pub const SIMILAR_LIMIT: usize = 3;

/// Reason attached to cart-similarity picks
pub const SIMILAR_TO_CART_REASON: &str = "Similar to books in your cart";
