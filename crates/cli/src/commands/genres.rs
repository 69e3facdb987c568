use folio_core::GenreSummary;
use serde::Serialize;

use crate::commands::{open_storefront, CommandResult, GlobalArgs};

const COMMAND: &str = "genres";

#[derive(Debug, Serialize)]
struct GenresOutput {
    genres: Vec<GenreSummary>,
    total: usize,
}

pub fn run(globals: &GlobalArgs) -> CommandResult {
    let storefront = match open_storefront(COMMAND, globals) {
        Ok(storefront) => storefront,
        Err(result) => return result,
    };

    let genres = storefront.genres();
    let total = genres.iter().map(|summary| summary.count).sum();
    let message = format!("{} genres, {total} books", genres.len());

    CommandResult::success(COMMAND, message, GenresOutput { genres, total })
}
