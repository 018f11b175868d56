use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{BookDraft, ExternalSearchRecord, SearchResponse};
use tracing::debug;

use crate::{error::ClientError, transport::send_for_json, SearchApi};

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

const COVER_URL_PREFIX: &str = "https://covers.openlibrary.org/b/id/";
const COVER_URL_SUFFIX: &str = "-M.jpg";

/// Medium-size cover image for a provider cover identifier.
pub fn cover_url(cover_id: i64) -> String {
    format!("{COVER_URL_PREFIX}{cover_id}{COVER_URL_SUFFIX}")
}

/// Maps a search record onto a create body. Total: every missing field falls
/// back to a fixed default.
pub fn to_import_payload(record: &ExternalSearchRecord) -> BookDraft {
    BookDraft {
        title: record.title.clone(),
        author: record.first_author().unwrap_or(UNKNOWN_AUTHOR).to_string(),
        isbn: record.first_isbn().unwrap_or_default().to_string(),
        description: record.first_sentence().unwrap_or_default().to_string(),
        cover_url: record.cover_i.map(cover_url).unwrap_or_default(),
    }
}

pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    search_url: String,
    limit: usize,
}

impl SearchClient {
    pub fn new(search_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), search_url, DEFAULT_SEARCH_LIMIT)
    }

    pub fn with_http(http: Client, search_url: impl Into<String>, limit: usize) -> Self {
        Self {
            http,
            search_url: search_url.into(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[async_trait]
impl SearchApi for SearchClient {
    async fn search(&self, query: &str) -> Result<Vec<ExternalSearchRecord>, ClientError> {
        if is_blank_query(query) {
            debug!("search: blank query, skipping provider call");
            return Ok(Vec::new());
        }

        let request = self
            .http
            .get(&self.search_url)
            .query(&[("q", query.to_string()), ("limit", self.limit.to_string())]);
        debug!(query, limit = self.limit, "search: querying provider");
        let response: SearchResponse = send_for_json(&self.search_url, request).await?;

        let mut docs = response.docs.unwrap_or_default();
        docs.truncate(self.limit);
        Ok(docs)
    }
}
