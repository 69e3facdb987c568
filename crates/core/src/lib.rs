pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;
pub mod recommend;
pub mod shop;
pub mod storefront;

pub use catalog::{CatalogDocument, CatalogError, CatalogStore, GenreBucket, GenreSummary};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::book::{BookId, BookRecord, Genre};
pub use domain::cart::{Cart, CartLineItem};
pub use domain::context::{Mood, ReadingGoal, RecommendationContext, TimeOfDay};
pub use errors::{ApplicationError, DomainError};
pub use pricing::{
    CouponOutcome, CouponPolicy, DeterministicPricingEngine, PricingEngine, PricingPolicy,
    PricingResult, PricingTraceStep,
};
pub use recommend::{
    Recommendation, RecommendationEngine, RecommendationLimits, RecommendationSource,
};
pub use shop::{FilterCriteria, GenreSelection, SortKey};
pub use storefront::{CartSelection, Storefront};
