//! User actions, backend result events and error modeling for the catalog
//! controller.

use client_core::{ClientError, ClientErrorKind};
use shared::{
    domain::BookId,
    protocol::{Book, BookPage, ExternalSearchRecord, Review},
};

use crate::{
    commands::BackendCommand,
    forms::{CreateFormPatch, EditFormPatch, ReviewFormPatch},
    navigation::Tab,
};

/// Input coming from the render surface.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Initial load of the catalog.
    Start,
    SelectTab(Tab),
    /// Card activation in the catalog grid.
    OpenBook(BookId),
    CloseDetail,
    UpdateCreateForm(CreateFormPatch),
    SubmitCreate,
    BeginEdit,
    UpdateEditForm(EditFormPatch),
    SubmitEdit,
    CancelEdit,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
    UpdateReviewForm(ReviewFormPatch),
    SubmitReview,
    EditSearchQuery(String),
    SubmitSearch,
    /// Import the external result at this position of the current results.
    ImportResult(usize),
    DismissNotice,
}

/// Where a create request came from; decides what success does to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOrigin {
    Form,
    Import,
}

impl CreateOrigin {
    pub fn error_context(self) -> UiErrorContext {
        match self {
            CreateOrigin::Form => UiErrorContext::CreateBook,
            CreateOrigin::Import => UiErrorContext::ImportBook,
        }
    }
}

/// Results posted back by the backend worker.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Info(String),
    CatalogLoaded {
        generation: u64,
        page: BookPage,
    },
    DetailLoaded {
        generation: u64,
        book: Book,
    },
    SearchCompleted {
        generation: u64,
        results: Vec<ExternalSearchRecord>,
    },
    SearchFailed {
        generation: u64,
    },
    BookCreated {
        book: Book,
        origin: CreateOrigin,
    },
    BookUpdated {
        book: Book,
    },
    BookDeleted {
        book_id: BookId,
    },
    ReviewAdded {
        book_id: BookId,
        review: Review,
    },
    /// The command never reached the backend worker.
    CommandNotQueued {
        command: BackendCommand,
        reason: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    User(UserAction),
    Backend(UiEvent),
}

impl From<UserAction> for AppEvent {
    fn from(value: UserAction) -> Self {
        AppEvent::User(value)
    }
}

impl From<UiEvent> for AppEvent {
    fn from(value: UiEvent) -> Self {
        AppEvent::Backend(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Malformed,
    Unknown,
}

impl From<ClientErrorKind> for UiErrorCategory {
    fn from(value: ClientErrorKind) -> Self {
        match value {
            ClientErrorKind::Network => UiErrorCategory::Transport,
            ClientErrorKind::NonOkResponse => UiErrorCategory::Server,
            ClientErrorKind::Parse => UiErrorCategory::Malformed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CreateBook,
    ImportBook,
    UpdateBook,
    DeleteBook,
    AddReview,
}

impl UiErrorContext {
    fn user_message(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => {
                "The background worker could not start. Restart the application."
            }
            UiErrorContext::CreateBook => "Could not add the book. Please try again.",
            UiErrorContext::ImportBook => "Could not import the book. Please try again.",
            UiErrorContext::UpdateBook => "Could not update the book. Please try again.",
            UiErrorContext::DeleteBook => "Could not delete the book. Please try again.",
            UiErrorContext::AddReview => "Could not add the review. Please try again.",
        }
    }
}

/// A failed user-initiated operation. The category and detail are kept for
/// diagnostics; the user only ever sees the generic per-operation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        Self {
            category: err.kind().into(),
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn user_message(&self) -> &'static str {
        self.context.user_message()
    }
}
