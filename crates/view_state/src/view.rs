//! Read-only projections the render surface draws from a snapshot.

use client_core::{search::cover_url, UNKNOWN_AUTHOR};
use shared::{domain::BookId, protocol::Book};

use crate::state::ViewState;

#[derive(Debug, Clone, PartialEq)]
pub struct BookCard {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub rating_label: String,
    pub reviews_label: String,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalCard {
    /// Position in the current results; what an import refers to.
    pub index: usize,
    pub title: String,
    pub author: String,
    pub year_label: String,
    pub cover_url: Option<String>,
}

pub fn rating_label(book: &Book) -> String {
    if book.average_rating > 0.0 {
        format!("{:.1} / 5", book.average_rating)
    } else {
        "No ratings yet".to_string()
    }
}

fn reviews_label(count: u32) -> String {
    match count {
        1 => "1 review".to_string(),
        n => format!("{n} reviews"),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn catalog_cards(state: &ViewState) -> Vec<BookCard> {
    state
        .catalog
        .iter()
        .map(|book| BookCard {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            rating_label: rating_label(book),
            reviews_label: reviews_label(book.reviews_count),
            cover_url: non_empty(book.cover_url.as_deref()),
        })
        .collect()
}

pub fn external_cards(state: &ViewState) -> Vec<ExternalCard> {
    state
        .external_results
        .iter()
        .enumerate()
        .map(|(index, record)| ExternalCard {
            index,
            title: record.title.clone(),
            author: record.first_author().unwrap_or(UNKNOWN_AUTHOR).to_string(),
            year_label: record
                .first_publish_year
                .map(|year| year.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            cover_url: record.cover_i.map(cover_url),
        })
        .collect()
}
