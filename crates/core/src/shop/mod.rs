//! Shop listing pipeline: filter the catalog, then order the result.

pub mod filter;
pub mod sort;

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogStore;
use crate::domain::book::{BookRecord, Genre};
use crate::errors::DomainError;

pub use filter::filter;
pub use sort::sort;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenreSelection {
    #[default]
    All,
    Only(Genre),
}

impl FromStr for GenreSelection {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

impl fmt::Display for GenreSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(genre) => f.write_str(genre.label()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Rating,
    Discount,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Discount => "discount",
        }
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "featured" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            "discount" => Ok(Self::Discount),
            other => Err(DomainError::UnrecognizedValue {
                field: "sort key",
                value: other.to_owned(),
                expected: "featured|price-low|price-high|rating|discount",
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shop filter state. `max_price: None` leaves the upper bound open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub genre: GenreSelection,
    pub query: String,
    pub min_price: Decimal,
    pub max_price: Option<Decimal>,
    pub min_rating: u8,
    pub sort_key: SortKey,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            genre: GenreSelection::All,
            query: String::new(),
            min_price: Decimal::ZERO,
            max_price: None,
            min_rating: 0,
            sort_key: SortKey::Featured,
        }
    }
}

impl FilterCriteria {
    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = GenreSelection::Only(genre);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_price_range(mut self, min_price: Decimal, max_price: Option<Decimal>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    pub fn with_min_rating(mut self, min_rating: u8) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }
}

/// Shop listing: narrows the catalog by `criteria` and orders by its sort key.
pub fn browse(catalog: &CatalogStore, criteria: &FilterCriteria) -> Vec<BookRecord> {
    sort(&catalog.filter(criteria), criteria.sort_key)
}

#[cfg(test)]
mod tests {
    use super::{browse, FilterCriteria, GenreSelection, SortKey};
    use crate::catalog::seed::seed_catalog;
    use crate::domain::book::Genre;

    #[test]
    fn parses_genre_selection_and_sort_key() {
        assert_eq!("ALL".parse::<GenreSelection>(), Ok(GenreSelection::All));
        assert_eq!("mystery".parse::<GenreSelection>(), Ok(GenreSelection::Only(Genre::Mystery)));
        assert_eq!("price-high".parse::<SortKey>(), Ok(SortKey::PriceHigh));
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn browse_limits_to_bucket_and_orders_by_rating() {
        let catalog = seed_catalog().expect("seed catalog");
        let criteria =
            FilterCriteria::default().with_genre(Genre::SciFi).with_sort_key(SortKey::Rating);

        let listing = browse(&catalog, &criteria);

        assert!(listing.iter().all(|book| book.genre == Genre::SciFi));
        assert!(listing.windows(2).all(|pair| pair[0].rating >= pair[1].rating));
        assert_eq!(listing.len(), catalog.bucket(Genre::SciFi).len());
    }

    #[test]
    fn browse_with_no_matches_is_empty() {
        let catalog = seed_catalog().expect("seed catalog");
        let criteria = FilterCriteria::default().with_query("no such title anywhere");

        assert!(browse(&catalog, &criteria).is_empty());
    }
}
