pub mod commands;

use clap::{Parser, Subcommand};

use crate::commands::browse::BrowseArgs;
use crate::commands::recommend::RecommendArgs;
use crate::commands::{CommandResult, GlobalArgs};

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    about = "Folio storefront CLI",
    long_about = "Browse the book catalog, get context-aware recommendations, and price carts.",
    after_help = "Examples:\n  folio genres\n  folio browse --genre Fiction --sort price-low\n  folio recommend --mood relaxed --time-of-day evening --goal relaxation --cart fic-001\n  folio price --cart fic-001:2 --cart nov-002 --coupon BOOKS50"
)]
pub struct Cli {
    #[command(flatten)]
    pub globals: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List genre buckets with book counts")]
    Genres,
    #[command(about = "Filter and sort the catalog like the shop page")]
    Browse {
        #[arg(long, help = "Genre label or `all`")]
        genre: Option<String>,
        #[arg(long, help = "Case-insensitive match on title or author")]
        query: Option<String>,
        #[arg(long, help = "Lowest effective price, inclusive")]
        min_price: Option<String>,
        #[arg(long, help = "Highest effective price, inclusive")]
        max_price: Option<String>,
        #[arg(long, help = "Minimum star rating (0-5)")]
        min_rating: Option<u8>,
        #[arg(long, help = "featured|price-low|price-high|rating|discount")]
        sort: Option<String>,
    },
    #[command(about = "Recommend books for a mood, time of day and reading goal")]
    Recommend {
        #[arg(long, help = "relaxed|focused|inspired")]
        mood: String,
        #[arg(long, help = "morning|afternoon|evening")]
        time_of_day: String,
        #[arg(long, help = "learning|entertainment|personal_growth|relaxation")]
        goal: String,
        #[arg(long, value_name = "ID[:QTY]", help = "Book already in the cart (repeatable)")]
        cart: Vec<String>,
        #[arg(long, help = "Maximum recommendations (defaults to configured limit)")]
        limit: Option<usize>,
    },
    #[command(about = "Show same-genre titles for a book")]
    Similar {
        id: String,
        #[arg(long, help = "Maximum similar titles (defaults to configured limit)")]
        limit: Option<usize>,
    },
    #[command(about = "Price a cart with shipping and an optional coupon")]
    Price {
        #[arg(long, value_name = "ID[:QTY]", help = "Book in the cart (repeatable)")]
        cart: Vec<String>,
        #[arg(long, help = "Coupon code")]
        coupon: Option<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution and redaction")]
    Config,
}

pub fn execute(cli: Cli) -> CommandResult {
    let globals = cli.globals;

    match cli.command {
        Command::Genres => commands::genres::run(&globals),
        Command::Browse { genre, query, min_price, max_price, min_rating, sort } => {
            let args = BrowseArgs { genre, query, min_price, max_price, min_rating, sort };
            commands::browse::run(&globals, &args)
        }
        Command::Recommend { mood, time_of_day, goal, cart, limit } => {
            let args = RecommendArgs { mood, time_of_day, goal, cart, limit };
            commands::recommend::run(&globals, &args)
        }
        Command::Similar { id, limit } => commands::similar::run(&globals, &id, limit),
        Command::Price { cart, coupon } => commands::price::run(&globals, &cart, coupon.as_deref()),
        Command::Config => commands::config::run(&globals),
    }
}
