use client_core::config::DEFAULT_PAGE_SIZE;
use shared::{
    domain::BookId,
    protocol::{Book, ExternalSearchRecord},
};

use crate::{
    forms::{CreateForm, EditForm, ReviewForm},
    navigation::Navigation,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Error notices must be acknowledged before the user continues.
    pub fn is_blocking(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Latest generation issued per background domain. A result stamped with an
/// older generation is stale and gets dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generations {
    pub catalog: u64,
    pub detail: u64,
    pub search: u64,
}

/// One immutable snapshot of everything the render surface draws.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub navigation: Navigation,
    pub page_size: u32,
    pub catalog: Vec<Book>,
    pub catalog_total: Option<u64>,
    pub selection: Option<Book>,
    pub search_query: String,
    pub external_results: Vec<ExternalSearchRecord>,
    pub search_loading: bool,
    pub create_form: CreateForm,
    pub edit_form: Option<EditForm>,
    pub review_form: ReviewForm,
    pub notice: Option<Notice>,
    pub status: String,
    pub generations: Generations,
}

impl ViewState {
    pub fn new(page_size: u32) -> Self {
        Self {
            navigation: Navigation::default(),
            page_size,
            catalog: Vec::new(),
            catalog_total: None,
            selection: None,
            search_query: String::new(),
            external_results: Vec::new(),
            search_loading: false,
            create_form: CreateForm::default(),
            edit_form: None,
            review_form: ReviewForm::default(),
            notice: None,
            status: String::new(),
            generations: Generations::default(),
        }
    }

    pub fn selected_id(&self) -> Option<BookId> {
        self.selection.as_ref().map(|book| book.id)
    }

    pub fn has_blocking_notice(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::is_blocking)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
