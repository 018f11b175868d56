use shared::domain::BookId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    MyBooks,
    Search,
    Add,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::MyBooks, Tab::Search, Tab::Add];

    pub fn label(self) -> &'static str {
        match self {
            Tab::MyBooks => "My Books",
            Tab::Search => "Search (Open Library)",
            Tab::Add => "Add Book",
        }
    }
}

/// Dialogs layered over the book detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    EditBook,
    ConfirmDelete(BookId),
}

/// Active tab plus modal visibility. Transitions consume the old value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigation {
    pub tab: Tab,
    pub modal: Option<Modal>,
}

impl Navigation {
    /// Switching tabs always closes any open modal.
    pub fn select_tab(self, tab: Tab) -> Self {
        if tab == self.tab {
            return self;
        }
        Self { tab, modal: None }
    }

    pub fn open_modal(self, modal: Modal) -> Self {
        Self {
            modal: Some(modal),
            ..self
        }
    }

    pub fn close_modal(self) -> Self {
        Self {
            modal: None,
            ..self
        }
    }

    pub fn pending_delete(&self) -> Option<BookId> {
        match self.modal {
            Some(Modal::ConfirmDelete(book_id)) => Some(book_id),
            _ => None,
        }
    }
}
