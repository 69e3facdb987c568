use folio_core::{CartLineItem, PricingResult};
use serde::Serialize;

use crate::commands::{invalid_input, open_storefront, parse_cart, CommandResult, GlobalArgs};

const COMMAND: &str = "price";

#[derive(Debug, Serialize)]
struct PriceOutput {
    items: Vec<CartLineItem>,
    item_count: u32,
    reading_hours: u32,
    pricing: PricingResult,
}

pub fn run(globals: &GlobalArgs, cart: &[String], coupon: Option<&str>) -> CommandResult {
    let selections = match parse_cart(COMMAND, cart) {
        Ok(selections) => selections,
        Err(result) => return result,
    };

    let storefront = match open_storefront(COMMAND, globals) {
        Ok(storefront) => storefront,
        Err(result) => return result,
    };
    let cart = match storefront.cart_from_selections(&selections) {
        Ok(cart) => cart,
        Err(error) => return invalid_input(COMMAND, error),
    };

    let pricing = storefront.price(cart.items(), coupon);
    let message = format!("{} items, total {}", cart.item_count(), pricing.total);

    CommandResult::success(
        COMMAND,
        message,
        PriceOutput {
            item_count: cart.item_count(),
            reading_hours: cart.reading_time_hours(),
            items: cart.items().to_vec(),
            pricing,
        },
    )
}
