use folio_core::errors::DomainError;
use folio_core::{BookId, BookRecord};
use serde::Serialize;

use crate::commands::{invalid_input, open_storefront, CommandResult, GlobalArgs};

const COMMAND: &str = "similar";

#[derive(Debug, Serialize)]
struct SimilarOutput {
    book: BookRecord,
    similar: Vec<BookRecord>,
}

pub fn run(globals: &GlobalArgs, id: &str, limit: Option<usize>) -> CommandResult {
    let storefront = match open_storefront(COMMAND, globals) {
        Ok(storefront) => storefront,
        Err(result) => return result,
    };

    let id = BookId::from(id.trim());
    let Some(book) = storefront.book(&id).cloned() else {
        return invalid_input(COMMAND, DomainError::UnknownBook(id.to_string()));
    };

    let similar = storefront.similar(&id, limit);
    let message = format!("{} titles similar to {}", similar.len(), book.title);

    CommandResult::success(COMMAND, message, SimilarOutput { book, similar })
}
