//! Recommendation engine implementation

use std::collections::HashSet;

use super::tables::{goal_genres, goal_phrase, mood_genres, mood_phrase};
use super::types::*;
use super::SIMILAR_TO_CART_REASON;
use crate::catalog::CatalogStore;
use crate::domain::book::{BookId, BookRecord, Genre};
use crate::domain::cart::CartLineItem;
use crate::domain::context::RecommendationContext;

/// Union of the mood/time genres and the goal genres, mood/time first.
fn candidate_genres(context: &RecommendationContext) -> Vec<Genre> {
    let mut genres: Vec<Genre> = Vec::new();
    for genre in mood_genres(context.mood, context.time_of_day)
        .into_iter()
        .chain(goal_genres(context.reading_goal).iter().copied())
    {
        if !genres.contains(&genre) {
            genres.push(genre);
        }
    }
    genres
}

fn context_reason(context: &RecommendationContext) -> String {
    format!(
        "{}. {}",
        mood_phrase(context.mood, context.time_of_day),
        goal_phrase(context.reading_goal)
    )
}

/// Distinct genres of the cart's books in cart order. Books missing from the catalog are skipped.
fn cart_genres(catalog: &CatalogStore, cart: &[CartLineItem]) -> Vec<Genre> {
    let mut genres: Vec<Genre> = Vec::new();
    for genre in cart.iter().filter_map(|item| catalog.genre_of(item.id())) {
        if !genres.contains(&genre) {
            genres.push(genre);
        }
    }
    genres
}

/// Highest-rated books of a bucket not excluded, ties kept in bucket order.
fn top_rated<'a>(
    bucket: &'a [BookRecord],
    excluded: &HashSet<&BookId>,
    take: usize,
) -> Vec<&'a BookRecord> {
    let mut eligible: Vec<&BookRecord> =
        bucket.iter().filter(|book| !excluded.contains(&book.id)).collect();
    eligible.sort_by(|a, b| b.rating.cmp(&a.rating));
    eligible.truncate(take);
    eligible
}

/// The main recommendation engine
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    limits: RecommendationLimits,
}

impl RecommendationEngine {
    /// Create an engine with the default caps
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom caps
    pub fn with_limits(limits: RecommendationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> RecommendationLimits {
        self.limits
    }

    /// Recommendations for the current cart, capped at the configured limit
    pub fn recommend(
        &self,
        catalog: &CatalogStore,
        cart: &[CartLineItem],
        context: &RecommendationContext,
    ) -> Vec<Recommendation> {
        self.recommend_up_to(catalog, cart, context, self.limits.limit)
    }

    /// Recommendations for the current cart, capped at `limit`
    pub fn recommend_up_to(
        &self,
        catalog: &CatalogStore,
        cart: &[CartLineItem],
        context: &RecommendationContext,
        limit: usize,
    ) -> Vec<Recommendation> {
        let in_cart: HashSet<&BookId> = cart.iter().map(CartLineItem::id).collect();
        let mut picks = Vec::new();

        let genres = candidate_genres(context);
        tracing::debug!(
            event_name = "recommend.candidate_genres",
            mood = %context.mood,
            time_of_day = %context.time_of_day,
            reading_goal = %context.reading_goal,
            genres = genres.len(),
            "resolved candidate genres"
        );

        let reason = context_reason(context);
        for genre in genres {
            for book in top_rated(catalog.bucket(genre), &in_cart, self.limits.per_genre) {
                picks.push(Recommendation {
                    book: book.clone(),
                    genre,
                    reason: reason.clone(),
                    source: RecommendationSource::ContextMatch,
                });
            }
        }

        for genre in cart_genres(catalog, cart) {
            for book in top_rated(catalog.bucket(genre), &in_cart, self.limits.per_cart_genre) {
                picks.push(Recommendation {
                    book: book.clone(),
                    genre,
                    reason: SIMILAR_TO_CART_REASON.to_owned(),
                    source: RecommendationSource::CartSimilarity,
                });
            }
        }

        // First occurrence wins, so context picks take priority over cart-similarity picks.
        let mut seen = HashSet::new();
        picks.retain(|pick| seen.insert(pick.book.id.clone()));
        picks.truncate(limit);
        picks
    }

    /// Same-genre titles for a book detail page, best rated first
    pub fn similar_to(&self, catalog: &CatalogStore, id: &BookId) -> Vec<BookRecord> {
        let Some(genre) = catalog.genre_of(id) else {
            return Vec::new();
        };

        let excluded: HashSet<&BookId> = HashSet::from([id]);
        top_rated(catalog.bucket(genre), &excluded, self.limits.similar_limit)
            .into_iter()
            .cloned()
            .collect()
    }
}

/// Recommendations with default per-genre caps and an explicit `limit`.
pub fn recommend(
    catalog: &CatalogStore,
    cart: &[CartLineItem],
    context: &RecommendationContext,
    limit: usize,
) -> Vec<Recommendation> {
    RecommendationEngine::new().recommend_up_to(catalog, cart, context, limit)
}

/// Up to `limit` same-genre titles for the book `id`, best rated first.
pub fn similar_books(catalog: &CatalogStore, id: &BookId, limit: usize) -> Vec<BookRecord> {
    RecommendationEngine::with_limits(RecommendationLimits {
        similar_limit: limit,
        ..RecommendationLimits::default()
    })
    .similar_to(catalog, id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::GenreBucket;
    use crate::domain::context::{Mood, ReadingGoal, TimeOfDay};
    use crate::recommend::DEFAULT_LIMIT;

    fn book(id: &str, genre: Genre, rating: u8) -> BookRecord {
        BookRecord {
            id: BookId(id.to_owned()),
            title: format!("Title {id}"),
            author: "Author".to_owned(),
            genre,
            price: Decimal::from(300),
            discounted_price: None,
            rating,
            image: String::new(),
            description: None,
        }
    }

    fn bucket(genre: Genre, books: &[(&str, u8)]) -> GenreBucket {
        GenreBucket {
            genre,
            books: books.iter().map(|(id, rating)| book(id, genre, *rating)).collect(),
        }
    }

    fn line(book: &BookRecord) -> CartLineItem {
        CartLineItem { book: book.clone(), quantity: 1 }
    }

    fn ids(picks: &[Recommendation]) -> Vec<&str> {
        picks.iter().map(|pick| pick.book.id.as_str()).collect()
    }

    fn relaxed_morning_learning() -> RecommendationContext {
        RecommendationContext::new(Mood::Relaxed, TimeOfDay::Morning, ReadingGoal::Learning)
    }

    #[test]
    fn candidate_genres_union_collapses_duplicates() {
        // relaxed/morning => Comedy, Essays; learning => Educational, Dictionary, Essays
        let genres = candidate_genres(&relaxed_morning_learning());
        assert_eq!(
            genres,
            vec![Genre::Comedy, Genre::Essays, Genre::Educational, Genre::Dictionary]
        );
    }

    #[test]
    fn picks_top_two_per_genre_with_stable_rating_ties() {
        let catalog = CatalogStore::new(vec![bucket(
            Genre::Comedy,
            &[("c-3a", 3), ("c-5", 5), ("c-3b", 3), ("c-4", 4)],
        )])
        .expect("valid catalog");

        let picks = recommend(&catalog, &[], &relaxed_morning_learning(), DEFAULT_LIMIT);
        assert_eq!(ids(&picks), vec!["c-5", "c-4"]);

        let tied = CatalogStore::new(vec![bucket(Genre::Comedy, &[("t-1", 4), ("t-2", 4), ("t-3", 4)])])
            .expect("valid catalog");
        let picks = recommend(&tied, &[], &relaxed_morning_learning(), DEFAULT_LIMIT);
        assert_eq!(ids(&picks), vec!["t-1", "t-2"]);
    }

    #[test]
    fn excludes_cart_books_and_adds_cart_similarity_pass() {
        let catalog = CatalogStore::new(vec![
            bucket(Genre::Comedy, &[("c-1", 5), ("c-2", 4)]),
            bucket(Genre::Mystery, &[("m-1", 5), ("m-2", 4), ("m-3", 3)]),
        ])
        .expect("valid catalog");
        let cart = vec![line(&catalog.bucket(Genre::Mystery)[0])];

        let picks = recommend(&catalog, &cart, &relaxed_morning_learning(), DEFAULT_LIMIT);

        assert_eq!(ids(&picks), vec!["c-1", "c-2", "m-2"]);
        assert_eq!(picks[2].reason, SIMILAR_TO_CART_REASON);
        assert_eq!(picks[2].source, RecommendationSource::CartSimilarity);
        assert_eq!(picks[2].genre, Genre::Mystery);
    }

    #[test]
    fn context_pick_wins_over_cart_similarity_duplicate() {
        let catalog = CatalogStore::new(vec![bucket(Genre::Comedy, &[("c-1", 5), ("c-2", 4), ("c-3", 3)])])
            .expect("valid catalog");
        let cart = vec![line(&catalog.bucket(Genre::Comedy)[2])];

        let picks = recommend(&catalog, &cart, &relaxed_morning_learning(), DEFAULT_LIMIT);

        // c-1 is both the top context pick and the top cart-similarity pick.
        assert_eq!(ids(&picks), vec!["c-1", "c-2"]);
        assert!(picks.iter().all(|pick| pick.source == RecommendationSource::ContextMatch));
    }

    #[test]
    fn respects_limit_without_duplicates() {
        let catalog = crate::catalog::seed::seed_catalog().expect("seed catalog");
        let context =
            RecommendationContext::new(Mood::Inspired, TimeOfDay::Afternoon, ReadingGoal::Entertainment);

        for limit in [0, 1, 3, DEFAULT_LIMIT, 20] {
            let picks = recommend(&catalog, &[], &context, limit);
            assert!(picks.len() <= limit);
            let unique: HashSet<&str> = ids(&picks).into_iter().collect();
            assert_eq!(unique.len(), picks.len());
        }
    }

    #[test]
    fn cart_books_missing_from_catalog_are_ignored() {
        let catalog = CatalogStore::new(vec![bucket(Genre::Comedy, &[("c-1", 5)])]).expect("valid catalog");
        let stray = book("gone", Genre::Drama, 5);

        let picks = recommend(&catalog, &[line(&stray)], &relaxed_morning_learning(), DEFAULT_LIMIT);
        assert_eq!(ids(&picks), vec!["c-1"]);
    }

    #[test]
    fn similar_books_exclude_the_book_itself() {
        let catalog = CatalogStore::new(vec![bucket(
            Genre::Fantasy,
            &[("f-1", 3), ("f-2", 5), ("f-3", 4), ("f-4", 5), ("f-5", 2)],
        )])
        .expect("valid catalog");

        let similar = similar_books(&catalog, &BookId::from("f-2"), 3);
        let similar_ids: Vec<&str> = similar.iter().map(|book| book.id.as_str()).collect();

        assert_eq!(similar_ids, vec!["f-4", "f-3", "f-1"]);
        assert!(similar_books(&catalog, &BookId::from("unknown"), 3).is_empty());
    }
}
