//! Built-in storefront catalog used when no catalog file is configured.

use rust_decimal::Decimal;

use super::{CatalogError, CatalogStore, GenreBucket};
use crate::domain::book::{BookId, BookRecord, Genre};

#[derive(Debug, Clone, Copy)]
struct BookSeed {
    id: &'static str,
    title: &'static str,
    author: &'static str,
    genre: Genre,
    price: i64,
    discounted_price: Option<i64>,
    rating: u8,
    description: Option<&'static str>,
}

const BOOK_SEEDS: &[BookSeed] = &[
    BookSeed {
        id: "fic-001",
        title: "The Midnight Library",
        author: "Matt Haig",
        genre: Genre::Fiction,
        price: 499,
        discounted_price: Some(399),
        rating: 5,
        description: Some("Between life and death there is a library of every life you could have lived."),
    },
    BookSeed {
        id: "fic-002",
        title: "The Alchemist",
        author: "Paulo Coelho",
        genre: Genre::Fiction,
        price: 350,
        discounted_price: None,
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "fic-003",
        title: "Klara and the Sun",
        author: "Kazuo Ishiguro",
        genre: Genre::Fiction,
        price: 599,
        discounted_price: Some(449),
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "nov-001",
        title: "Pride and Prejudice",
        author: "Jane Austen",
        genre: Genre::Novel,
        price: 299,
        discounted_price: None,
        rating: 5,
        description: Some("A comedy of manners about the Bennet sisters."),
    },
    BookSeed {
        id: "nov-002",
        title: "The Great Gatsby",
        author: "F. Scott Fitzgerald",
        genre: Genre::Novel,
        price: 250,
        discounted_price: Some(199),
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "dra-001",
        title: "Death of a Salesman",
        author: "Arthur Miller",
        genre: Genre::Drama,
        price: 325,
        discounted_price: None,
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "dra-002",
        title: "A Doll's House",
        author: "Henrik Ibsen",
        genre: Genre::Drama,
        price: 275,
        discounted_price: Some(225),
        rating: 5,
        description: None,
    },
    BookSeed {
        id: "com-001",
        title: "Good Omens",
        author: "Terry Pratchett & Neil Gaiman",
        genre: Genre::Comedy,
        price: 450,
        discounted_price: Some(360),
        rating: 5,
        description: Some("The world ends on Saturday. Next Saturday, just before dinner."),
    },
    BookSeed {
        id: "com-002",
        title: "Three Men in a Boat",
        author: "Jerome K. Jerome",
        genre: Genre::Comedy,
        price: 199,
        discounted_price: None,
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "com-003",
        title: "Right Ho, Jeeves",
        author: "P. G. Wodehouse",
        genre: Genre::Comedy,
        price: 299,
        discounted_price: None,
        rating: 5,
        description: None,
    },
    BookSeed {
        id: "fan-001",
        title: "The Hobbit",
        author: "J. R. R. Tolkien",
        genre: Genre::Fantasy,
        price: 550,
        discounted_price: Some(475),
        rating: 5,
        description: None,
    },
    BookSeed {
        id: "fan-002",
        title: "The Name of the Wind",
        author: "Patrick Rothfuss",
        genre: Genre::Fantasy,
        price: 699,
        discounted_price: None,
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "mys-001",
        title: "And Then There Were None",
        author: "Agatha Christie",
        genre: Genre::Mystery,
        price: 299,
        discounted_price: Some(249),
        rating: 5,
        description: None,
    },
    BookSeed {
        id: "mys-002",
        title: "The Hound of the Baskervilles",
        author: "Arthur Conan Doyle",
        genre: Genre::Mystery,
        price: 225,
        discounted_price: None,
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "rom-001",
        title: "Me Before You",
        author: "Jojo Moyes",
        genre: Genre::Romance,
        price: 399,
        discounted_price: Some(329),
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "rom-002",
        title: "Persuasion",
        author: "Jane Austen",
        genre: Genre::Romance,
        price: 249,
        discounted_price: None,
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "sci-001",
        title: "Dune",
        author: "Frank Herbert",
        genre: Genre::SciFi,
        price: 650,
        discounted_price: Some(520),
        rating: 5,
        description: Some("Spice, sandworms and the politics of Arrakis."),
    },
    BookSeed {
        id: "sci-002",
        title: "Project Hail Mary",
        author: "Andy Weir",
        genre: Genre::SciFi,
        price: 599,
        discounted_price: None,
        rating: 5,
        description: None,
    },
    BookSeed {
        id: "sci-003",
        title: "Neuromancer",
        author: "William Gibson",
        genre: Genre::SciFi,
        price: 450,
        discounted_price: None,
        rating: 3,
        description: None,
    },
    BookSeed {
        id: "edu-001",
        title: "A Brief History of Time",
        author: "Stephen Hawking",
        genre: Genre::Educational,
        price: 499,
        discounted_price: Some(425),
        rating: 5,
        description: None,
    },
    BookSeed {
        id: "edu-002",
        title: "Sapiens",
        author: "Yuval Noah Harari",
        genre: Genre::Educational,
        price: 599,
        discounted_price: Some(499),
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "edu-003",
        title: "Atomic Habits",
        author: "James Clear",
        genre: Genre::Educational,
        price: 799,
        discounted_price: None,
        rating: 5,
        description: None,
    },
    BookSeed {
        id: "dic-001",
        title: "Oxford Advanced Learner's Dictionary",
        author: "A. S. Hornby",
        genre: Genre::Dictionary,
        price: 1299,
        discounted_price: Some(1099),
        rating: 5,
        description: None,
    },
    BookSeed {
        id: "dic-002",
        title: "Roget's Thesaurus",
        author: "Peter Mark Roget",
        genre: Genre::Dictionary,
        price: 899,
        discounted_price: None,
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "ess-001",
        title: "Consider the Lobster",
        author: "David Foster Wallace",
        genre: Genre::Essays,
        price: 450,
        discounted_price: None,
        rating: 4,
        description: None,
    },
    BookSeed {
        id: "ess-002",
        title: "Self-Reliance",
        author: "Ralph Waldo Emerson",
        genre: Genre::Essays,
        price: 199,
        discounted_price: Some(149),
        rating: 5,
        description: None,
    },
];

fn build_record(seed: &BookSeed) -> BookRecord {
    BookRecord {
        id: BookId(seed.id.to_owned()),
        title: seed.title.to_owned(),
        author: seed.author.to_owned(),
        genre: seed.genre,
        price: Decimal::from(seed.price),
        discounted_price: seed.discounted_price.map(Decimal::from),
        rating: seed.rating,
        image: format!("https://covers.folio.example/{}.jpg", seed.id),
        description: seed.description.map(str::to_owned),
    }
}

pub fn seed_buckets() -> Vec<GenreBucket> {
    let mut buckets: Vec<GenreBucket> = Vec::new();
    for seed in BOOK_SEEDS {
        let record = build_record(seed);
        match buckets.iter_mut().find(|bucket| bucket.genre == seed.genre) {
            Some(bucket) => bucket.books.push(record),
            None => buckets.push(GenreBucket { genre: seed.genre, books: vec![record] }),
        }
    }
    buckets
}

pub fn seed_catalog() -> Result<CatalogStore, CatalogError> {
    CatalogStore::new(seed_buckets())
}
