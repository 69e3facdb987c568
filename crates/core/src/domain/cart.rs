use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::book::{BookId, BookRecord};
use crate::errors::DomainError;

/// Estimated reading time budgeted per copy in the cart.
pub const READING_HOURS_PER_BOOK: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub book: BookRecord,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(book: BookRecord, quantity: u32) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { book_id: book.id.0.clone(), quantity });
        }
        Ok(Self { book, quantity })
    }

    pub fn id(&self) -> &BookId {
        &self.book.id
    }

    pub fn line_total(&self) -> Decimal {
        self.book.effective_price() * Decimal::from(self.quantity)
    }

    pub fn reading_time_hours(&self) -> u32 {
        self.quantity.saturating_mul(READING_HOURS_PER_BOOK)
    }
}

/// Line-item bookkeeping for a shopper's cart. Items keep insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Total copies across all lines, saturating at `u32::MAX`.
    pub fn item_count(&self) -> u32 {
        self.items.iter().fold(0u32, |total, item| total.saturating_add(item.quantity))
    }

    /// Adds one copy, incrementing the existing line when the id is already present.
    pub fn add(&mut self, book: &BookRecord) {
        if let Some(existing) = self.items.iter_mut().find(|item| item.book.id == book.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return;
        }
        self.items.push(CartLineItem { book: book.clone(), quantity: 1 });
    }

    /// Adds `quantity` copies at once, merging into an existing line.
    pub fn add_copies(&mut self, book: &BookRecord, quantity: u32) -> Result<(), DomainError> {
        let line = CartLineItem::new(book.clone(), quantity)?;
        match self.items.iter_mut().find(|item| item.id() == line.id()) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.items.push(line),
        }
        Ok(())
    }

    pub fn reading_time_hours(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.reading_time_hours()))
    }

    /// Returns false when no line carries `id`. A quantity below one removes the line.
    pub fn update_quantity(&mut self, id: &BookId, quantity: u32) -> bool {
        if quantity < 1 {
            return self.remove(id);
        }

        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &BookId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
