use folio_core::{Recommendation, RecommendationContext};
use serde::Serialize;

use crate::commands::{invalid_input, open_storefront, parse_cart, CommandResult, GlobalArgs};

const COMMAND: &str = "recommend";

#[derive(Debug, Clone, Default)]
pub struct RecommendArgs {
    pub mood: String,
    pub time_of_day: String,
    pub goal: String,
    pub cart: Vec<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct RecommendOutput {
    context: RecommendationContext,
    count: usize,
    recommendations: Vec<Recommendation>,
}

pub fn run(globals: &GlobalArgs, args: &RecommendArgs) -> CommandResult {
    let context = match RecommendationContext::parse(&args.mood, &args.time_of_day, &args.goal) {
        Ok(context) => context,
        Err(error) => return invalid_input(COMMAND, error),
    };
    let selections = match parse_cart(COMMAND, &args.cart) {
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

    let recommendations = storefront.recommend(cart.items(), &context, args.limit);
    let message = format!(
        "{} recommendations for a {} {} reader focused on {}",
        recommendations.len(),
        context.mood,
        context.time_of_day,
        context.reading_goal
    );

    CommandResult::success(
        COMMAND,
        message,
        RecommendOutput { context, count: recommendations.len(), recommendations },
    )
}
