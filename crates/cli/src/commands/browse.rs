use folio_core::shop::{FilterCriteria, GenreSelection, SortKey};
use folio_core::BookRecord;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::{open_storefront, parse_amount, parse_optional, CommandResult, GlobalArgs};

const COMMAND: &str = "browse";

#[derive(Debug, Clone, Default)]
pub struct BrowseArgs {
    pub genre: Option<String>,
    pub query: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_rating: Option<u8>,
    pub sort: Option<String>,
}

/// A shop listing row: the record plus the price the shopper actually pays.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(flatten)]
    pub book: BookRecord,
    pub effective_price: Decimal,
    pub discount_percent: Option<u32>,
}

impl From<BookRecord> for Listing {
    fn from(book: BookRecord) -> Self {
        Self {
            effective_price: book.effective_price(),
            discount_percent: book.discount_percent(),
            book,
        }
    }
}

#[derive(Debug, Serialize)]
struct BrowseOutput {
    genre: String,
    sort: SortKey,
    count: usize,
    books: Vec<Listing>,
}

pub fn run(globals: &GlobalArgs, args: &BrowseArgs) -> CommandResult {
    let criteria = match criteria_from_args(args) {
        Ok(criteria) => criteria,
        Err(result) => return result,
    };

    let storefront = match open_storefront(COMMAND, globals) {
        Ok(storefront) => storefront,
        Err(result) => return result,
    };

    let books: Vec<Listing> = storefront.browse(&criteria).into_iter().map(Listing::from).collect();
    let message = format!("{} books match", books.len());

    CommandResult::success(
        COMMAND,
        message,
        BrowseOutput {
            genre: criteria.genre.to_string(),
            sort: criteria.sort_key,
            count: books.len(),
            books,
        },
    )
}

fn criteria_from_args(args: &BrowseArgs) -> Result<FilterCriteria, CommandResult> {
    let genre = parse_optional::<GenreSelection>(COMMAND, args.genre.as_deref())?;
    let sort_key = parse_optional::<SortKey>(COMMAND, args.sort.as_deref())?;
    let min_price = parse_amount(COMMAND, "minimum price", args.min_price.as_deref())?;
    let max_price = parse_amount(COMMAND, "maximum price", args.max_price.as_deref())?;

    let mut criteria = FilterCriteria {
        genre: genre.unwrap_or(GenreSelection::All),
        min_rating: args.min_rating.unwrap_or(0),
        sort_key: sort_key.unwrap_or(SortKey::Featured),
        ..FilterCriteria::default()
    };
    if let Some(query) = &args.query {
        criteria = criteria.with_query(query.as_str());
    }
    Ok(criteria.with_price_range(min_price.unwrap_or(Decimal::ZERO), max_price))
}

#[cfg(test)]
mod tests {
    use folio_core::shop::{GenreSelection, SortKey};
    use folio_core::Genre;
    use rust_decimal::Decimal;

    use super::{criteria_from_args, BrowseArgs};

    #[test]
    fn criteria_defaults_to_everything_in_featured_order() {
        let criteria = criteria_from_args(&BrowseArgs::default()).expect("defaults are valid");

        assert_eq!(criteria.genre, GenreSelection::All);
        assert_eq!(criteria.sort_key, SortKey::Featured);
        assert_eq!(criteria.min_price, Decimal::ZERO);
        assert_eq!(criteria.max_price, None);
    }

    #[test]
    fn criteria_parse_genre_label_and_sort_key() {
        let args = BrowseArgs {
            genre: Some("sci-fi".to_string()),
            sort: Some("price-high".to_string()),
            max_price: Some("450".to_string()),
            min_rating: Some(4),
            ..BrowseArgs::default()
        };
        let criteria = criteria_from_args(&args).expect("valid args");

        assert_eq!(criteria.genre, GenreSelection::Only(Genre::SciFi));
        assert_eq!(criteria.sort_key, SortKey::PriceHigh);
        assert_eq!(criteria.max_price, Some(Decimal::from(450)));
        assert_eq!(criteria.min_rating, 4);
    }

    #[test]
    fn unknown_sort_key_is_invalid_input() {
        let args = BrowseArgs { sort: Some("newest".to_string()), ..BrowseArgs::default() };
        let result = criteria_from_args(&args).expect_err("unknown sort key must fail");
        assert_eq!(result.exit_code, 4);
        assert!(result.output.contains("sort key"));
    }
}
