//! Transient form buffers. Each form is merged from partial patches and turned
//! into a request body only after the required fields are present.

use shared::{
    domain::{BookId, Rating},
    protocol::{Book, BookDraft, BookUpdate, ReviewDraft},
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub description: String,
    pub cover_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateFormPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

impl CreateForm {
    pub fn merge(self, patch: CreateFormPatch) -> Self {
        Self {
            title: patch.title.unwrap_or(self.title),
            author: patch.author.unwrap_or(self.author),
            isbn: patch.isbn.unwrap_or(self.isbn),
            description: patch.description.unwrap_or(self.description),
            cover_url: patch.cover_url.unwrap_or(self.cover_url),
        }
    }

    pub fn to_draft(&self) -> Result<BookDraft, FormError> {
        Ok(BookDraft {
            title: required("Title", &self.title)?,
            author: required("Author", &self.author)?,
            isbn: self.isbn.trim().to_string(),
            description: self.description.trim().to_string(),
            cover_url: self.cover_url.trim().to_string(),
        })
    }
}

/// Edit buffer for the two fields the catalog lets this client change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditFormPatch {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl EditForm {
    pub fn seeded_from(book: &Book) -> Self {
        Self {
            book_id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
        }
    }

    pub fn merge(self, patch: EditFormPatch) -> Self {
        Self {
            book_id: self.book_id,
            title: patch.title.unwrap_or(self.title),
            author: patch.author.unwrap_or(self.author),
        }
    }

    /// A field left blank keeps the book's current value.
    pub fn to_update(&self, current: &Book) -> BookUpdate {
        let keep_or = |edited: &str, previous: &str| {
            let edited = edited.trim();
            if edited.is_empty() {
                previous.to_string()
            } else {
                edited.to_string()
            }
        };
        BookUpdate {
            title: Some(keep_or(&self.title, &current.title)),
            author: Some(keep_or(&self.author, &current.author)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewForm {
    pub user_name: String,
    pub rating: Rating,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFormPatch {
    pub user_name: Option<String>,
    pub rating: Option<Rating>,
    pub comment: Option<String>,
}

impl ReviewForm {
    pub fn merge(self, patch: ReviewFormPatch) -> Self {
        Self {
            user_name: patch.user_name.unwrap_or(self.user_name),
            rating: patch.rating.unwrap_or(self.rating),
            comment: patch.comment.unwrap_or(self.comment),
        }
    }

    pub fn to_draft(&self) -> Result<ReviewDraft, FormError> {
        let comment = self.comment.trim();
        Ok(ReviewDraft {
            user_name: required("Name", &self.user_name)?,
            rating: self.rating,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        })
    }
}
