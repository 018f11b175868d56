//! Executes backend commands against the catalog and search clients and turns
//! each outcome into at most one event for the reducer.

use std::sync::Arc;

use client_core::{CatalogApi, SearchApi};
use tracing::{error, info, warn};

use crate::{
    commands::BackendCommand,
    events::{UiError, UiErrorContext, UiEvent},
};

#[derive(Clone)]
pub struct EffectHandler {
    catalog: Arc<dyn CatalogApi>,
    search: Arc<dyn SearchApi>,
}

impl EffectHandler {
    pub fn new(catalog: Arc<dyn CatalogApi>, search: Arc<dyn SearchApi>) -> Self {
        Self { catalog, search }
    }

    /// Background fetch failures are logged and produce no event. Mutation
    /// failures come back as a user-facing error.
    pub async fn execute(&self, command: BackendCommand) -> Option<UiEvent> {
        let name = command.name();
        info!(command = name, "executing backend command");

        match command {
            BackendCommand::ListBooks { generation, query } => {
                match self.catalog.list_books(&query).await {
                    Ok(page) => Some(UiEvent::CatalogLoaded { generation, page }),
                    Err(err) => {
                        warn!(command = name, kind = ?err.kind(), "catalog refresh failed: {err}");
                        None
                    }
                }
            }
            BackendCommand::FetchBook {
                generation,
                book_id,
            } => match self.catalog.get_book(book_id).await {
                Ok(book) => Some(UiEvent::DetailLoaded { generation, book }),
                Err(err) => {
                    warn!(command = name, book_id = book_id.0, "book fetch failed: {err}");
                    None
                }
            },
            BackendCommand::CreateBook { draft, origin } => {
                match self.catalog.create_book(&draft).await {
                    Ok(book) => Some(UiEvent::BookCreated { book, origin }),
                    Err(err) => Some(report(origin.error_context(), name, &err)),
                }
            }
            BackendCommand::UpdateBook { book_id, update } => {
                match self.catalog.update_book(book_id, &update).await {
                    Ok(book) => Some(UiEvent::BookUpdated { book }),
                    Err(err) => Some(report(UiErrorContext::UpdateBook, name, &err)),
                }
            }
            BackendCommand::DeleteBook { book_id } => {
                match self.catalog.delete_book(book_id).await {
                    Ok(()) => Some(UiEvent::BookDeleted { book_id }),
                    Err(err) => Some(report(UiErrorContext::DeleteBook, name, &err)),
                }
            }
            BackendCommand::AddReview { book_id, review } => {
                match self.catalog.add_review(book_id, &review).await {
                    Ok(review) => Some(UiEvent::ReviewAdded { book_id, review }),
                    Err(err) => Some(report(UiErrorContext::AddReview, name, &err)),
                }
            }
            BackendCommand::Search { generation, query } => {
                match self.search.search(&query).await {
                    Ok(results) => Some(UiEvent::SearchCompleted {
                        generation,
                        results,
                    }),
                    Err(err) => {
                        warn!(command = name, "external search failed: {err}");
                        Some(UiEvent::SearchFailed { generation })
                    }
                }
            }
        }
    }
}

fn report(context: UiErrorContext, name: &str, err: &client_core::ClientError) -> UiEvent {
    error!(command = name, kind = ?err.kind(), "{err}");
    UiEvent::Error(UiError::from_client_error(context, err))
}

#[cfg(test)]
#[path = "tests/effects_tests.rs"]
mod tests;
