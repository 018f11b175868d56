use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{BookId, SortOrder},
    protocol::{
        Book, BookDraft, BookPage, BookUpdate, HealthResponse, Review, ReviewDraft,
    },
};
use tracing::debug;

use crate::{
    error::ClientError,
    transport::{send_expecting_success, send_for_json},
    CatalogApi,
};

/// Parameters of the list endpoint. The GUI only ever sets `per_page`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub per_page: u32,
    pub page: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<SortOrder>,
}

impl ListQuery {
    pub fn first_page(per_page: u32) -> Self {
        Self {
            per_page,
            page: None,
            search: None,
            sort_by: None,
        }
    }

    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("per_page", self.per_page.to_string())];
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                pairs.push(("search", search.to_string()));
            }
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sort_by", sort_by.as_query_value().to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), base_url)
    }

    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = format!("{}/health", self.base_url);
        send_for_json(&url, self.http.get(&url)).await
    }

    fn book_url(&self, id: BookId) -> String {
        format!("{}/books/{}", self.base_url, id.0)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_books(&self, query: &ListQuery) -> Result<BookPage, ClientError> {
        let url = format!("{}/books", self.base_url);
        debug!(per_page = query.per_page, "catalog: list books");
        send_for_json(&url, self.http.get(&url).query(&query.to_pairs())).await
    }

    async fn get_book(&self, id: BookId) -> Result<Book, ClientError> {
        let url = self.book_url(id);
        debug!(book_id = id.0, "catalog: get book");
        send_for_json(&url, self.http.get(&url)).await
    }

    async fn create_book(&self, draft: &BookDraft) -> Result<Book, ClientError> {
        let url = format!("{}/books", self.base_url);
        debug!(title = %draft.title, "catalog: create book");
        send_for_json(&url, self.http.post(&url).json(draft)).await
    }

    async fn update_book(&self, id: BookId, update: &BookUpdate) -> Result<Book, ClientError> {
        let url = self.book_url(id);
        debug!(book_id = id.0, "catalog: update book");
        send_for_json(&url, self.http.put(&url).json(update)).await
    }

    async fn delete_book(&self, id: BookId) -> Result<(), ClientError> {
        let url = self.book_url(id);
        debug!(book_id = id.0, "catalog: delete book");
        send_expecting_success(&url, self.http.delete(&url)).await?;
        Ok(())
    }

    async fn add_review(
        &self,
        book_id: BookId,
        review: &ReviewDraft,
    ) -> Result<Review, ClientError> {
        let url = format!("{}/reviews", self.book_url(book_id));
        debug!(book_id = book_id.0, rating = review.rating.value(), "catalog: add review");
        send_for_json(&url, self.http.post(&url).json(review)).await
    }
}
