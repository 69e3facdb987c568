//! Storefront facade over the catalog, recommendation and pricing engines.
//!
//! A [`Storefront`] is built once from configuration and then only read, so it
//! can be shared across threads. Cart state is always passed in by the caller.

use crate::catalog::{seed, CatalogStore, GenreSummary};
use crate::config::AppConfig;
use crate::domain::book::{BookId, BookRecord};
use crate::domain::cart::{Cart, CartLineItem};
use crate::domain::context::RecommendationContext;
use crate::errors::{ApplicationError, DomainError};
use crate::pricing::{DeterministicPricingEngine, PricingEngine, PricingResult};
use crate::recommend::{Recommendation, RecommendationEngine};
use crate::shop::{self, FilterCriteria};

/// A requested cart line before it is resolved against the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartSelection {
    pub id: BookId,
    pub quantity: u32,
}

impl CartSelection {
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self { id: BookId(id.into()), quantity }
    }
}

impl std::str::FromStr for CartSelection {
    type Err = DomainError;

    /// Parses `ID` or `ID:QTY`; a bare id means one copy.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let (id, quantity) = match value.rsplit_once(':') {
            Some((id, raw_quantity)) => {
                let quantity = raw_quantity.trim().parse::<u32>().map_err(|_| {
                    DomainError::UnrecognizedValue {
                        field: "cart quantity",
                        value: raw_quantity.to_string(),
                        expected: "a whole number of copies",
                    }
                })?;
                (id.trim(), quantity)
            }
            None => (value, 1),
        };

        if id.is_empty() {
            return Err(DomainError::UnrecognizedValue {
                field: "cart entry",
                value: value.to_string(),
                expected: "ID or ID:QTY",
            });
        }

        Ok(Self::new(id, quantity))
    }
}

pub struct Storefront<P = DeterministicPricingEngine> {
    catalog: CatalogStore,
    recommender: RecommendationEngine,
    pricing_engine: P,
}

impl<P> Storefront<P> {
    pub fn new(catalog: CatalogStore, recommender: RecommendationEngine, pricing_engine: P) -> Self {
        Self { catalog, recommender, pricing_engine }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn recommender(&self) -> &RecommendationEngine {
        &self.recommender
    }

    pub fn pricing_engine(&self) -> &P {
        &self.pricing_engine
    }
}

impl Storefront<DeterministicPricingEngine> {
    /// Loads the configured catalog file, or the built-in seed catalog when none is set.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let catalog = match &config.catalog.path {
            Some(path) => CatalogStore::load(path)?,
            None => seed::seed_catalog()?,
        };

        Ok(Self::new(
            catalog,
            RecommendationEngine::with_limits(config.recommendation_limits()),
            DeterministicPricingEngine::new(config.pricing_policy()),
        ))
    }
}

impl<P> Storefront<P>
where
    P: PricingEngine,
{
    pub fn genres(&self) -> Vec<GenreSummary> {
        self.catalog.genre_summaries()
    }

    pub fn browse(&self, criteria: &FilterCriteria) -> Vec<BookRecord> {
        let books = shop::browse(&self.catalog, criteria);
        tracing::info!(
            event_name = "storefront.browse.completed",
            genre = %criteria.genre,
            sort_key = %criteria.sort_key,
            matched = books.len(),
            "browse completed"
        );
        books
    }

    pub fn book(&self, id: &BookId) -> Option<&BookRecord> {
        self.catalog.find(id)
    }

    /// Resolves selections against the catalog, merging repeated ids.
    pub fn cart_from_selections(&self, selections: &[CartSelection]) -> Result<Cart, DomainError> {
        let mut cart = Cart::new();
        for selection in selections {
            let book = self
                .catalog
                .find(&selection.id)
                .ok_or_else(|| DomainError::UnknownBook(selection.id.to_string()))?;
            cart.add_copies(book, selection.quantity)?;
        }
        Ok(cart)
    }

    /// Recommendations for `cart`; `limit` falls back to the configured cap.
    pub fn recommend(
        &self,
        cart: &[CartLineItem],
        context: &RecommendationContext,
        limit: Option<usize>,
    ) -> Vec<Recommendation> {
        let limit = limit.unwrap_or(self.recommender.limits().limit);
        let picks = self.recommender.recommend_up_to(&self.catalog, cart, context, limit);
        tracing::info!(
            event_name = "storefront.recommend.completed",
            mood = %context.mood,
            time_of_day = %context.time_of_day,
            reading_goal = %context.reading_goal,
            cart_lines = cart.len(),
            recommended = picks.len(),
            "recommendations computed"
        );
        picks
    }

    pub fn similar(&self, id: &BookId, limit: Option<usize>) -> Vec<BookRecord> {
        let books = match limit {
            Some(limit) => crate::recommend::similar_books(&self.catalog, id, limit),
            None => self.recommender.similar_to(&self.catalog, id),
        };
        tracing::debug!(
            event_name = "storefront.similar.completed",
            book_id = %id,
            similar = books.len(),
            "similar titles resolved"
        );
        books
    }

    pub fn price(&self, cart: &[CartLineItem], coupon_code: Option<&str>) -> PricingResult {
        let result = self.pricing_engine.price(cart, coupon_code);
        tracing::info!(
            event_name = "storefront.price.completed",
            cart_lines = cart.len(),
            coupon_applied = result.coupon.is_applied(),
            total = %result.total,
            "cart priced"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{CartSelection, Storefront};
    use crate::catalog::CatalogStore;
    use crate::config::AppConfig;
    use crate::domain::book::{BookId, BookRecord, Genre};
    use crate::domain::cart::CartLineItem;
    use crate::domain::context::{Mood, ReadingGoal, RecommendationContext, TimeOfDay};
    use crate::errors::DomainError;
    use crate::pricing::{CouponOutcome, PricingEngine, PricingResult};
    use crate::recommend::RecommendationEngine;
    use crate::shop::{FilterCriteria, SortKey};

    struct FlatRatePricing;

    impl PricingEngine for FlatRatePricing {
        fn price(&self, cart: &[CartLineItem], _coupon_code: Option<&str>) -> PricingResult {
            let total = Decimal::from(cart.len() as i64);
            PricingResult {
                subtotal: total,
                shipping: Decimal::ZERO,
                discount: Decimal::ZERO,
                total,
                coupon: CouponOutcome::NotProvided,
                trace: Vec::new(),
            }
        }
    }

    fn seed_storefront() -> Storefront {
        Storefront::from_config(&AppConfig::default()).expect("seed storefront")
    }

    fn book(id: &str, genre: Genre, price: i64, rating: u8) -> BookRecord {
        BookRecord {
            id: BookId(id.to_owned()),
            title: format!("Title {id}"),
            author: "Author".to_owned(),
            genre,
            price: Decimal::from(price),
            discounted_price: None,
            rating,
            image: String::new(),
            description: None,
        }
    }

    #[test]
    fn cart_selection_parses_id_and_optional_quantity() {
        assert_eq!("fic-001".parse::<CartSelection>(), Ok(CartSelection::new("fic-001", 1)));
        assert_eq!(" fic-001:3 ".parse::<CartSelection>(), Ok(CartSelection::new("fic-001", 3)));
        assert!(matches!(
            "fic-001:many".parse::<CartSelection>(),
            Err(DomainError::UnrecognizedValue { field: "cart quantity", .. })
        ));
        assert!(":2".parse::<CartSelection>().is_err());
    }

    #[test]
    fn default_storefront_serves_seed_catalog() {
        let storefront = seed_storefront();
        assert!(!storefront.catalog().is_empty());
        assert_eq!(storefront.genres().len(), Genre::ALL.len());
    }

    #[test]
    fn cart_from_selections_rejects_unknown_books() {
        let storefront = seed_storefront();
        let error = storefront
            .cart_from_selections(&[CartSelection::new("no-such-book", 1)])
            .expect_err("unknown id must fail");
        assert_eq!(error, DomainError::UnknownBook("no-such-book".to_owned()));
    }

    #[test]
    fn facade_delegates_to_injected_pricing_engine() {
        let catalog = CatalogStore::from_books(vec![
            book("a", Genre::Comedy, 100, 5),
            book("b", Genre::Comedy, 200, 4),
        ])
        .expect("valid catalog");
        let storefront = Storefront::new(catalog, RecommendationEngine::new(), FlatRatePricing);

        let cart = storefront
            .cart_from_selections(&[CartSelection::new("a", 2), CartSelection::new("b", 1)])
            .expect("known books");
        assert_eq!(cart.item_count(), 3);
        assert_eq!(storefront.price(cart.items(), None).total, Decimal::from(2));

        let listing = storefront.browse(&FilterCriteria::default().with_sort_key(SortKey::PriceHigh));
        let ids: Vec<&str> = listing.iter().map(|book| book.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let context =
            RecommendationContext::new(Mood::Relaxed, TimeOfDay::Morning, ReadingGoal::Learning);
        let picks = storefront.recommend(&cart.items()[..1], &context, Some(1));
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].book.id.as_str(), "b");
    }
}
