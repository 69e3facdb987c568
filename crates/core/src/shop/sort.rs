use std::cmp::Ordering;

use crate::domain::book::BookRecord;

use super::SortKey;

/// Returns a reordered copy of `books`. The sort is stable: records with equal
/// keys keep their input order.
pub fn sort(books: &[BookRecord], key: SortKey) -> Vec<BookRecord> {
    let mut ordered = books.to_vec();
    match key {
        SortKey::Featured => {}
        SortKey::PriceLow => ordered.sort_by(|a, b| a.effective_price().cmp(&b.effective_price())),
        SortKey::PriceHigh => ordered.sort_by(|a, b| b.effective_price().cmp(&a.effective_price())),
        SortKey::Rating => ordered.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortKey::Discount => ordered.sort_by(by_discount_desc),
    }
    ordered
}

fn by_discount_desc(a: &BookRecord, b: &BookRecord) -> Ordering {
    b.discount_amount().cmp(&a.discount_amount())
}
