use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Genre buckets the storefront groups its catalog by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    Novel,
    Drama,
    Comedy,
    Fantasy,
    Mystery,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Educational,
    Dictionary,
    Essays,
}

impl Genre {
    pub const ALL: [Genre; 11] = [
        Genre::Fiction,
        Genre::Novel,
        Genre::Drama,
        Genre::Comedy,
        Genre::Fantasy,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::Educational,
        Genre::Dictionary,
        Genre::Essays,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::Novel => "Novel",
            Genre::Drama => "Drama",
            Genre::Comedy => "Comedy",
            Genre::Fantasy => "Fantasy",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Educational => "Educational",
            Genre::Dictionary => "Dictionary",
            Genre::Essays => "Essays",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Genre::ALL
            .into_iter()
            .find(|genre| genre.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::UnrecognizedValue {
                field: "genre",
                value: trimmed.to_owned(),
                expected: "Fiction|Novel|Drama|Comedy|Fantasy|Mystery|Romance|Sci-Fi|Educational|Dictionary|Essays",
            })
    }
}

/// A purchasable title as it appears in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<Decimal>,
    pub rating: u8,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BookRecord {
    pub fn effective_price(&self) -> Decimal {
        self.discounted_price.unwrap_or(self.price)
    }

    /// Zero when the book is sold at list price.
    pub fn discount_amount(&self) -> Decimal {
        self.price - self.effective_price()
    }

    /// Whole-number percentage off list price, rounded half away from zero.
    pub fn discount_percent(&self) -> Option<u32> {
        let discounted = self.discounted_price?;
        if self.price <= Decimal::ZERO {
            return None;
        }

        ((self.price - discounted) / self.price * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }

    /// Checks the record-level invariants a catalog load must enforce.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.0.trim().is_empty() {
            return Err("id must not be empty".to_owned());
        }
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_owned());
        }
        if self.author.trim().is_empty() {
            return Err("author must not be empty".to_owned());
        }
        if self.price <= Decimal::ZERO {
            return Err(format!("price must be positive, got {}", self.price));
        }
        if let Some(discounted) = self.discounted_price {
            if discounted < Decimal::ZERO || discounted >= self.price {
                return Err(format!(
                    "discountedPrice {discounted} must be non-negative and below price {}",
                    self.price
                ));
            }
        }
        if self.rating > 5 {
            return Err(format!("rating must be within 0..=5, got {}", self.rating));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{BookId, BookRecord, Genre};

    fn book(price: i64, discounted: Option<i64>) -> BookRecord {
        BookRecord {
            id: BookId("b-1".to_owned()),
            title: "The Left Hand of Darkness".to_owned(),
            author: "Ursula K. Le Guin".to_owned(),
            genre: Genre::SciFi,
            price: Decimal::from(price),
            discounted_price: discounted.map(Decimal::from),
            rating: 5,
            image: "https://covers.example/b-1.jpg".to_owned(),
            description: None,
        }
    }

    #[test]
    fn effective_price_prefers_discounted_price() {
        assert_eq!(book(300, Some(200)).effective_price(), Decimal::from(200));
        assert_eq!(book(300, None).effective_price(), Decimal::from(300));
        assert_eq!(book(300, Some(200)).discount_amount(), Decimal::from(100));
        assert_eq!(book(300, None).discount_amount(), Decimal::ZERO);
    }

    #[test]
    fn discount_percent_rounds_to_whole_percent() {
        assert_eq!(book(300, Some(200)).discount_percent(), Some(33));
        assert_eq!(book(499, Some(299)).discount_percent(), Some(40));
        assert_eq!(book(300, None).discount_percent(), None);
    }

    #[test]
    fn genre_parsing_is_case_insensitive_and_rejects_unknown_labels() {
        assert_eq!("sci-fi".parse::<Genre>(), Ok(Genre::SciFi));
        assert_eq!(" Essays ".parse::<Genre>(), Ok(Genre::Essays));
        assert!("Poetry".parse::<Genre>().is_err());
    }

    #[test]
    fn validation_rejects_discount_not_below_price() {
        let error = book(300, Some(300)).validate().expect_err("equal discount must fail");
        assert!(error.contains("discountedPrice"));
        assert!(book(300, Some(299)).validate().is_ok());
    }

    #[test]
    fn deserializes_camel_case_discounted_price() {
        let json = r#"{
            "id": "b-7",
            "title": "Dune",
            "author": "Frank Herbert",
            "genre": "Sci-Fi",
            "price": 650,
            "discountedPrice": 520,
            "rating": 4,
            "image": "https://covers.example/b-7.jpg"
        }"#;

        let record: BookRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(record.genre, Genre::SciFi);
        assert_eq!(record.discounted_price, Some(Decimal::from(520)));
        assert_eq!(record.description, None);
    }
}
