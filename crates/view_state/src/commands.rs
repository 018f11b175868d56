//! Backend commands queued from the reducer to the backend worker.

use client_core::ListQuery;
use shared::{
    domain::BookId,
    protocol::{BookDraft, BookUpdate, ReviewDraft},
};

use crate::events::CreateOrigin;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    ListBooks {
        generation: u64,
        query: ListQuery,
    },
    FetchBook {
        generation: u64,
        book_id: BookId,
    },
    CreateBook {
        draft: BookDraft,
        origin: CreateOrigin,
    },
    UpdateBook {
        book_id: BookId,
        update: BookUpdate,
    },
    DeleteBook {
        book_id: BookId,
    },
    AddReview {
        book_id: BookId,
        review: ReviewDraft,
    },
    Search {
        generation: u64,
        query: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::ListBooks { .. } => "list_books",
            BackendCommand::FetchBook { .. } => "fetch_book",
            BackendCommand::CreateBook {
                origin: CreateOrigin::Form,
                ..
            } => "create_book",
            BackendCommand::CreateBook {
                origin: CreateOrigin::Import,
                ..
            } => "import_book",
            BackendCommand::UpdateBook { .. } => "update_book",
            BackendCommand::DeleteBook { .. } => "delete_book",
            BackendCommand::AddReview { .. } => "add_review",
            BackendCommand::Search { .. } => "search",
        }
    }

    /// Mutations report failures to the user; background fetches do not.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            BackendCommand::CreateBook { .. }
                | BackendCommand::UpdateBook { .. }
                | BackendCommand::DeleteBook { .. }
                | BackendCommand::AddReview { .. }
        )
    }
}
