//! Immutable, genre-bucketed book catalog.
//!
//! A [`CatalogStore`] is validated once when it is built and never mutated
//! afterwards, so the `id -> genre` index computed at construction stays valid
//! for the lifetime of the store.

pub mod seed;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::book::{BookId, BookRecord, Genre};
use crate::shop::{self, FilterCriteria, GenreSelection};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("invalid book record `{id}`: {reason}")]
    InvalidRecord { id: String, reason: String },
    #[error("duplicate book id `{0}` in catalog")]
    DuplicateId(String),
    #[error("genre bucket `{0}` appears more than once")]
    DuplicateBucket(Genre),
    #[error("book `{id}` declares genre `{declared}` but is stored in bucket `{bucket}`")]
    GenreMismatch { id: String, declared: Genre, bucket: Genre },
}

/// One genre bucket as it appears in a catalog document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreBucket {
    pub genre: Genre,
    pub books: Vec<BookRecord>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub buckets: Vec<GenreBucket>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreSummary {
    pub genre: Genre,
    pub count: usize,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogStore {
    buckets: Vec<GenreBucket>,
    genre_index: HashMap<BookId, Genre>,
}

impl CatalogStore {
    /// Validates every record and builds the id index. Bucket order is preserved.
    pub fn new(buckets: Vec<GenreBucket>) -> Result<Self, CatalogError> {
        let mut seen_buckets = HashSet::new();
        let mut genre_index = HashMap::new();

        for bucket in &buckets {
            if !seen_buckets.insert(bucket.genre) {
                return Err(CatalogError::DuplicateBucket(bucket.genre));
            }

            for book in &bucket.books {
                book.validate().map_err(|reason| CatalogError::InvalidRecord {
                    id: book.id.0.clone(),
                    reason,
                })?;

                if book.genre != bucket.genre {
                    return Err(CatalogError::GenreMismatch {
                        id: book.id.0.clone(),
                        declared: book.genre,
                        bucket: bucket.genre,
                    });
                }

                if genre_index.insert(book.id.clone(), bucket.genre).is_some() {
                    return Err(CatalogError::DuplicateId(book.id.0.clone()));
                }
            }
        }

        Ok(Self { buckets, genre_index })
    }

    /// Groups loose records into buckets in first-seen genre order.
    pub fn from_books(books: Vec<BookRecord>) -> Result<Self, CatalogError> {
        let mut buckets: Vec<GenreBucket> = Vec::new();
        for book in books {
            match buckets.iter_mut().find(|bucket| bucket.genre == book.genre) {
                Some(bucket) => bucket.books.push(book),
                None => buckets.push(GenreBucket { genre: book.genre, books: vec![book] }),
            }
        }
        Self::new(buckets)
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        Self::new(document.buckets)
    }

    pub fn from_json_str(raw: &str, origin: &Path) -> Result<Self, CatalogError> {
        let document = serde_json::from_str::<CatalogDocument>(raw)
            .map_err(|source| CatalogError::Parse { path: origin.to_path_buf(), source })?;
        Self::from_document(document)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let store = Self::from_json_str(&raw, path)?;

        tracing::info!(
            event_name = "catalog.loaded",
            path = %path.display(),
            buckets = store.buckets.len(),
            books = store.len(),
            "catalog loaded"
        );

        Ok(store)
    }

    pub fn buckets(&self) -> &[GenreBucket] {
        &self.buckets
    }

    /// Books of one bucket in catalog order; empty when the genre has no bucket.
    pub fn bucket(&self, genre: Genre) -> &[BookRecord] {
        self.buckets
            .iter()
            .find(|bucket| bucket.genre == genre)
            .map(|bucket| bucket.books.as_slice())
            .unwrap_or(&[])
    }

    pub fn books(&self) -> impl Iterator<Item = &BookRecord> {
        self.buckets.iter().flat_map(|bucket| bucket.books.iter())
    }

    pub fn flattened(&self) -> Vec<BookRecord> {
        self.books().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.genre_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genre_index.is_empty()
    }

    pub fn genre_of(&self, id: &BookId) -> Option<Genre> {
        self.genre_index.get(id).copied()
    }

    pub fn find(&self, id: &BookId) -> Option<&BookRecord> {
        let genre = self.genre_of(id)?;
        self.bucket(genre).iter().find(|book| &book.id == id)
    }

    pub fn genre_summaries(&self) -> Vec<GenreSummary> {
        self.buckets
            .iter()
            .map(|bucket| GenreSummary { genre: bucket.genre, count: bucket.books.len() })
            .collect()
    }

    /// Filters the flattened store, narrowing to one bucket first when a genre is selected.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<BookRecord> {
        match criteria.genre {
            GenreSelection::All => shop::filter(&self.flattened(), criteria),
            GenreSelection::Only(genre) => shop::filter(self.bucket(genre), criteria),
        }
    }
}
