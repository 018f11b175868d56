//! In-memory catalog and search doubles shared by the controller tests.

use std::sync::{
    atomic::{AtomicBool, AtomicI64, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use client_core::{CatalogApi, ClientError, ListQuery, SearchApi};
use reqwest::StatusCode;
use shared::{
    domain::{BookId, ReviewId},
    protocol::{
        Book, BookDraft, BookPage, BookUpdate, ExternalSearchRecord, Review, ReviewDraft,
    },
};

use crate::{
    effects::EffectHandler,
    events::{AppEvent, UserAction},
    state::ViewState,
    store::Store,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(BookId),
    Create(BookDraft),
    Update(BookId, BookUpdate),
    Delete(BookId),
    Review(BookId, ReviewDraft),
    Search(String),
}

#[derive(Default)]
pub struct FakeCatalog {
    books: Mutex<Vec<Book>>,
    next_id: AtomicI64,
    failing: AtomicBool,
    pub calls: Mutex<Vec<Call>>,
}

/// What every call returns while a double is switched to failing.
pub fn server_error(path: &str) -> ClientError {
    ClientError::NonOkResponse {
        url: format!("http://catalog.test/api{path}"),
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: Some("database unavailable".to_string()),
    }
}

pub fn book(id: i64, title: &str, author: &str) -> Book {
    Book {
        id: BookId(id),
        title: title.to_string(),
        author: author.to_string(),
        isbn: None,
        description: None,
        cover_url: None,
        average_rating: 0.0,
        reviews_count: 0,
        reviews: Vec::new(),
        created_at: None,
    }
}

impl FakeCatalog {
    pub fn with_books(books: Vec<Book>) -> Arc<Self> {
        let next = books.iter().map(|book| book.id.0).max().unwrap_or(0);
        Arc::new(Self {
            books: Mutex::new(books),
            next_id: AtomicI64::new(next),
            failing: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Calls are still recorded while failing; none of them touch the books.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self, path: &str) -> Result<(), ClientError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(server_error(path));
        }
        Ok(())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn find(&self, id: BookId) -> Option<Book> {
        self.books
            .lock()
            .expect("books lock")
            .iter()
            .find(|book| book.id == id)
            .cloned()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_books(&self, _query: &ListQuery) -> Result<BookPage, ClientError> {
        self.record(Call::List);
        self.check("/books")?;
        let books = self.books.lock().expect("books lock").clone();
        Ok(BookPage {
            total: Some(books.len() as u64),
            pages: Some(1),
            current_page: Some(1),
            books,
        })
    }

    async fn get_book(&self, id: BookId) -> Result<Book, ClientError> {
        self.record(Call::Get(id));
        self.check(&format!("/books/{id}"))?;
        Ok(self.find(id).unwrap_or_else(|| book(id.0, "missing", "missing")))
    }

    async fn create_book(&self, draft: &BookDraft) -> Result<Book, ClientError> {
        self.record(Call::Create(draft.clone()));
        self.check("/books")?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = book(id, &draft.title, &draft.author);
        self.books.lock().expect("books lock").push(created.clone());
        Ok(created)
    }

    async fn update_book(&self, id: BookId, update: &BookUpdate) -> Result<Book, ClientError> {
        self.record(Call::Update(id, update.clone()));
        self.check(&format!("/books/{id}"))?;
        let mut books = self.books.lock().expect("books lock");
        let target = books
            .iter_mut()
            .find(|book| book.id == id)
            .expect("updated book exists");
        if let Some(title) = &update.title {
            target.title = title.clone();
        }
        if let Some(author) = &update.author {
            target.author = author.clone();
        }
        Ok(target.clone())
    }

    async fn delete_book(&self, id: BookId) -> Result<(), ClientError> {
        self.record(Call::Delete(id));
        self.check(&format!("/books/{id}"))?;
        self.books.lock().expect("books lock").retain(|book| book.id != id);
        Ok(())
    }

    async fn add_review(
        &self,
        book_id: BookId,
        draft: &ReviewDraft,
    ) -> Result<Review, ClientError> {
        self.record(Call::Review(book_id, draft.clone()));
        self.check(&format!("/books/{book_id}/reviews"))?;
        let review = Review {
            id: ReviewId(1),
            book_id: Some(book_id),
            user_name: draft.user_name.clone(),
            rating: draft.rating,
            comment: draft.comment.clone(),
            created_at: None,
        };
        let mut books = self.books.lock().expect("books lock");
        if let Some(target) = books.iter_mut().find(|book| book.id == book_id) {
            target.reviews.push(review.clone());
            target.reviews_count += 1;
            let sum: u32 = target
                .reviews
                .iter()
                .map(|review| u32::from(review.rating.value()))
                .sum();
            target.average_rating = f64::from(sum) / f64::from(target.reviews_count);
        }
        Ok(review)
    }
}

#[derive(Default)]
pub struct FakeSearch {
    pub results: Vec<ExternalSearchRecord>,
    pub failing: bool,
    pub calls: Mutex<Vec<Call>>,
}

#[async_trait]
impl SearchApi for FakeSearch {
    async fn search(&self, query: &str) -> Result<Vec<ExternalSearchRecord>, ClientError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(Call::Search(query.to_string()));
        if self.failing {
            return Err(server_error("/search.json"));
        }
        Ok(self.results.clone())
    }
}

/// Drives a store against the doubles until no command is left in flight.
pub struct Harness {
    pub store: Store,
    pub handler: EffectHandler,
}

impl Harness {
    pub fn new(catalog: Arc<FakeCatalog>, search: Arc<FakeSearch>) -> Self {
        Self {
            store: Store::new(ViewState::default()),
            handler: EffectHandler::new(catalog, search),
        }
    }

    pub async fn settle(&mut self, event: impl Into<AppEvent>) {
        let mut pending = vec![event.into()];
        while let Some(event) = pending.pop() {
            for cmd in self.store.dispatch(event) {
                if let Some(result) = self.handler.execute(cmd).await {
                    pending.push(result.into());
                }
            }
        }
    }

    pub async fn act(&mut self, action: UserAction) {
        self.settle(action).await;
    }
}
