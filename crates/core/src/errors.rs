use thiserror::Error;

use crate::{catalog::CatalogError, config::ConfigError};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unrecognized {field} `{value}` (expected {expected})")]
    UnrecognizedValue { field: &'static str, value: String, expected: &'static str },
    #[error("invalid quantity {quantity} for book `{book_id}`: quantity must be at least 1")]
    InvalidQuantity { book_id: String, quantity: u32 },
    #[error("book `{0}` is not in the catalog")]
    UnknownBook(String),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl ApplicationError {
    /// Stable machine-readable class used by operator tooling.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "invalid_input",
            Self::Catalog(_) => "catalog_load",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => 2,
            Self::Catalog(_) => 3,
            Self::Domain(_) => 4,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) => "The request could not be processed. Check inputs and try again.",
            Self::Catalog(_) => "The catalog could not be loaded. Check the catalog file.",
            Self::Configuration(_) => "The configuration is invalid. Run `folio config` to inspect it.",
        }
    }
}
