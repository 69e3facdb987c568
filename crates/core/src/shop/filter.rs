use crate::domain::book::BookRecord;

use super::{FilterCriteria, GenreSelection};

/// Narrows `books` to the records matching every stage of `criteria`.
///
/// Stages are independent predicates combined with logical AND: genre, free
/// text over title and author, effective-price bounds (inclusive), minimum
/// rating. The input is left untouched and catalog order is preserved.
pub fn filter(books: &[BookRecord], criteria: &FilterCriteria) -> Vec<BookRecord> {
    // Surrounding whitespace in the query is ignored, so "the " matches like "the".
    let query = criteria.query.trim().to_lowercase();

    books
        .iter()
        .filter(|book| matches_genre(book, criteria.genre))
        .filter(|book| query.is_empty() || matches_query(book, &query))
        .filter(|book| matches_price(book, criteria))
        .filter(|book| criteria.min_rating == 0 || book.rating >= criteria.min_rating)
        .cloned()
        .collect()
}

fn matches_genre(book: &BookRecord, selection: GenreSelection) -> bool {
    match selection {
        GenreSelection::All => true,
        GenreSelection::Only(genre) => book.genre == genre,
    }
}

fn matches_query(book: &BookRecord, lowered_query: &str) -> bool {
    book.title.to_lowercase().contains(lowered_query)
        || book.author.to_lowercase().contains(lowered_query)
}

fn matches_price(book: &BookRecord, criteria: &FilterCriteria) -> bool {
    let price = book.effective_price();
    price >= criteria.min_price && criteria.max_price.map_or(true, |max| price <= max)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::filter;
    use crate::domain::book::{BookId, BookRecord, Genre};
    use crate::shop::FilterCriteria;

    fn book(id: &str, title: &str, author: &str, genre: Genre, price: i64, rating: u8) -> BookRecord {
        BookRecord {
            id: BookId(id.to_owned()),
            title: title.to_owned(),
            author: author.to_owned(),
            genre,
            price: Decimal::from(price),
            discounted_price: None,
            rating,
            image: String::new(),
            description: None,
        }
    }

    fn shelf() -> Vec<BookRecord> {
        vec![
            book("1", "Dune", "Frank Herbert", Genre::SciFi, 650, 5),
            book("2", "Emma", "Jane Austen", Genre::Romance, 250, 4),
            book("3", "Persuasion", "Jane Austen", Genre::Romance, 300, 3),
            book("4", "Hyperion", "Dan Simmons", Genre::SciFi, 900, 2),
            book("5", "Walden", "Henry David Thoreau", Genre::Essays, 120, 4),
        ]
    }

    fn ids(books: &[BookRecord]) -> Vec<&str> {
        books.iter().map(|book| book.id.as_str()).collect()
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        assert!(filter(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn default_criteria_keep_everything_in_order() {
        let books = shelf();
        assert_eq!(ids(&filter(&books, &FilterCriteria::default())), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn query_matches_title_or_author_case_insensitively() {
        let books = shelf();
        let by_author = FilterCriteria::default().with_query("AUSTEN");
        let by_title = FilterCriteria::default().with_query("yper");

        assert_eq!(ids(&filter(&books, &by_author)), vec!["2", "3"]);
        assert_eq!(ids(&filter(&books, &by_title)), vec!["4"]);
    }

    #[test]
    fn query_ignores_surrounding_whitespace() {
        let books = shelf();
        let padded = FilterCriteria::default().with_query("  emma ");

        assert_eq!(ids(&filter(&books, &padded)), vec!["2"]);
        assert_eq!(ids(&filter(&books, &FilterCriteria::default().with_query("   "))).len(), 5);
    }

    #[test]
    fn price_bounds_are_inclusive_on_effective_price() {
        let mut books = shelf();
        books[3].discounted_price = Some(Decimal::from(300));

        let criteria = FilterCriteria::default()
            .with_price_range(Decimal::from(250), Some(Decimal::from(300)));

        assert_eq!(ids(&filter(&books, &criteria)), vec!["2", "3", "4"]);

        let floor_only = FilterCriteria::default().with_price_range(Decimal::from(250), None);
        assert_eq!(ids(&filter(&books, &floor_only)), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn stages_combine_with_logical_and() {
        let books = shelf();
        let criteria = FilterCriteria::default()
            .with_genre(Genre::Romance)
            .with_query("austen")
            .with_min_rating(4);

        assert_eq!(ids(&filter(&books, &criteria)), vec!["2"]);
    }

    #[test]
    fn filtering_is_idempotent_and_never_fabricates_records() {
        let books = shelf();
        let criteria = FilterCriteria::default()
            .with_price_range(Decimal::from(200), Some(Decimal::from(700)))
            .with_min_rating(3);

        let once = filter(&books, &criteria);
        let twice = filter(&once, &criteria);

        assert_eq!(once, twice);
        assert!(once.iter().all(|book| books.contains(book)));
    }
}
