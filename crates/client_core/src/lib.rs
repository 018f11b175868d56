//! HTTP clients for the book catalog service and the external search provider.

use async_trait::async_trait;
use shared::{
    domain::BookId,
    protocol::{Book, BookDraft, BookPage, BookUpdate, ExternalSearchRecord, Review, ReviewDraft},
};

pub mod catalog;
pub mod config;
pub mod error;
pub mod search;
mod transport;

pub use catalog::{CatalogClient, ListQuery};
pub use config::{load_settings, ClientSettings, SettingsOverrides};
pub use error::{ClientError, ClientErrorKind};
pub use search::{to_import_payload, SearchClient, UNKNOWN_AUTHOR};

/// Operations against the catalog service. Results are authoritative: callers
/// replace their copies wholesale instead of patching them.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_books(&self, query: &ListQuery) -> Result<BookPage, ClientError>;
    async fn get_book(&self, id: BookId) -> Result<Book, ClientError>;
    async fn create_book(&self, draft: &BookDraft) -> Result<Book, ClientError>;
    async fn update_book(&self, id: BookId, update: &BookUpdate) -> Result<Book, ClientError>;
    async fn delete_book(&self, id: BookId) -> Result<(), ClientError>;
    async fn add_review(&self, book_id: BookId, review: &ReviewDraft)
        -> Result<Review, ClientError>;
}

#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Blank queries resolve to an empty result without touching the network.
    async fn search(&self, query: &str) -> Result<Vec<ExternalSearchRecord>, ClientError>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
