//! Pure state transitions: each event consumes the previous snapshot and
//! yields the next one plus the backend commands it requires.

use client_core::{search::is_blank_query, to_import_payload, ListQuery};
use shared::domain::BookId;
use tracing::debug;

use crate::{
    commands::BackendCommand,
    events::{AppEvent, CreateOrigin, UiEvent, UserAction},
    forms::{CreateForm, EditForm, ReviewForm},
    navigation::{Modal, Tab},
    state::{Notice, ViewState},
};

#[derive(Debug)]
pub struct Transition {
    pub state: ViewState,
    pub commands: Vec<BackendCommand>,
}

pub fn reduce(state: ViewState, event: AppEvent) -> Transition {
    match event {
        AppEvent::User(action) => reduce_action(state, action),
        AppEvent::Backend(event) => reduce_backend(state, event),
    }
}

fn request_catalog(state: &mut ViewState) -> BackendCommand {
    state.generations.catalog += 1;
    BackendCommand::ListBooks {
        generation: state.generations.catalog,
        query: ListQuery::first_page(state.page_size),
    }
}

fn request_detail(state: &mut ViewState, book_id: BookId) -> BackendCommand {
    state.generations.detail += 1;
    BackendCommand::FetchBook {
        generation: state.generations.detail,
        book_id,
    }
}

/// Clears the selection and everything layered on it. Bumping the detail
/// generation keeps an in-flight fetch from reopening the view.
fn close_detail(state: &mut ViewState) {
    state.selection = None;
    state.generations.detail += 1;
    state.edit_form = None;
    state.review_form = ReviewForm::default();
    state.navigation = state.navigation.close_modal();
}

fn switch_tab(state: &mut ViewState, tab: Tab) {
    let leaving = state.navigation.tab;
    if leaving == tab {
        return;
    }
    match leaving {
        Tab::Add => state.create_form = CreateForm::default(),
        Tab::MyBooks => close_detail(state),
        Tab::Search => {}
    }
    state.navigation = state.navigation.select_tab(tab);
}

/// Success notices never hide an error the user has not acknowledged yet.
fn post_info(state: &mut ViewState, message: String) {
    if !state.has_blocking_notice() {
        state.notice = Some(Notice::info(message));
    }
}

fn reduce_action(mut state: ViewState, action: UserAction) -> Transition {
    let mut commands = Vec::new();

    if state.has_blocking_notice() && action != UserAction::DismissNotice {
        debug!(?action, "ignoring user action while an error notice is open");
        return Transition { state, commands };
    }

    match action {
        UserAction::Start => commands.push(request_catalog(&mut state)),
        UserAction::SelectTab(tab) => switch_tab(&mut state, tab),
        UserAction::OpenBook(book_id) => commands.push(request_detail(&mut state, book_id)),
        UserAction::CloseDetail => close_detail(&mut state),
        UserAction::UpdateCreateForm(patch) => {
            state.create_form = std::mem::take(&mut state.create_form).merge(patch);
        }
        UserAction::SubmitCreate => match state.create_form.to_draft() {
            Ok(draft) => commands.push(BackendCommand::CreateBook {
                draft,
                origin: CreateOrigin::Form,
            }),
            Err(err) => state.notice = Some(Notice::error(err.to_string())),
        },
        UserAction::BeginEdit => {
            if let Some(book) = &state.selection {
                state.edit_form = Some(EditForm::seeded_from(book));
                state.navigation = state.navigation.open_modal(Modal::EditBook);
            }
        }
        UserAction::UpdateEditForm(patch) => {
            state.edit_form = state.edit_form.take().map(|form| form.merge(patch));
        }
        UserAction::SubmitEdit => {
            if let (Some(book), Some(form)) = (&state.selection, &state.edit_form) {
                if form.book_id == book.id {
                    commands.push(BackendCommand::UpdateBook {
                        book_id: book.id,
                        update: form.to_update(book),
                    });
                }
            }
        }
        UserAction::CancelEdit => {
            state.edit_form = None;
            if state.navigation.modal == Some(Modal::EditBook) {
                state.navigation = state.navigation.close_modal();
            }
        }
        UserAction::RequestDelete => {
            if let Some(book_id) = state.selected_id() {
                state.navigation = state.navigation.open_modal(Modal::ConfirmDelete(book_id));
            }
        }
        UserAction::ConfirmDelete => {
            if let Some(book_id) = state.navigation.pending_delete() {
                state.navigation = state.navigation.close_modal();
                commands.push(BackendCommand::DeleteBook { book_id });
            }
        }
        UserAction::CancelDelete => {
            if state.navigation.pending_delete().is_some() {
                state.navigation = state.navigation.close_modal();
            }
        }
        UserAction::UpdateReviewForm(patch) => {
            state.review_form = std::mem::take(&mut state.review_form).merge(patch);
        }
        UserAction::SubmitReview => {
            if let Some(book_id) = state.selected_id() {
                match state.review_form.to_draft() {
                    Ok(review) => commands.push(BackendCommand::AddReview { book_id, review }),
                    Err(err) => state.notice = Some(Notice::error(err.to_string())),
                }
            }
        }
        UserAction::EditSearchQuery(query) => state.search_query = query,
        UserAction::SubmitSearch => {
            // A blank query leaves any search already in flight untouched.
            if !is_blank_query(&state.search_query) {
                state.generations.search += 1;
                state.search_loading = true;
                commands.push(BackendCommand::Search {
                    generation: state.generations.search,
                    query: state.search_query.clone(),
                });
            }
        }
        UserAction::ImportResult(index) => {
            if let Some(record) = state.external_results.get(index) {
                commands.push(BackendCommand::CreateBook {
                    draft: to_import_payload(record),
                    origin: CreateOrigin::Import,
                });
            }
        }
        UserAction::DismissNotice => state.notice = None,
    }

    Transition { state, commands }
}

fn reduce_backend(mut state: ViewState, event: UiEvent) -> Transition {
    let mut commands = Vec::new();

    match event {
        UiEvent::Info(message) => state.status = message,
        UiEvent::CatalogLoaded { generation, page } => {
            if generation == state.generations.catalog {
                state.catalog = page.books;
                state.catalog_total = page.total;
            } else {
                debug!(
                    generation,
                    latest = state.generations.catalog,
                    "dropping stale catalog page"
                );
            }
        }
        UiEvent::DetailLoaded { generation, book } => {
            if generation == state.generations.detail {
                if state.selected_id() != Some(book.id) {
                    state.edit_form = None;
                    state.review_form = ReviewForm::default();
                    state.navigation = state.navigation.close_modal();
                }
                state.selection = Some(book);
            } else {
                debug!(
                    generation,
                    latest = state.generations.detail,
                    book_id = book.id.0,
                    "dropping stale book detail"
                );
            }
        }
        UiEvent::SearchCompleted {
            generation,
            results,
        } => {
            if generation == state.generations.search {
                state.external_results = results;
                state.search_loading = false;
            } else {
                debug!(
                    generation,
                    latest = state.generations.search,
                    "dropping stale search results"
                );
            }
        }
        UiEvent::SearchFailed { generation } => {
            if generation == state.generations.search {
                state.search_loading = false;
            }
        }
        UiEvent::BookCreated { book, origin } => {
            match origin {
                CreateOrigin::Form => {
                    state.create_form = CreateForm::default();
                    post_info(&mut state, format!("Added \"{}\"", book.title));
                }
                CreateOrigin::Import => {
                    switch_tab(&mut state, Tab::MyBooks);
                    post_info(&mut state, format!("Imported \"{}\"", book.title));
                }
            }
            commands.push(request_catalog(&mut state));
        }
        UiEvent::BookUpdated { book } => {
            if state
                .edit_form
                .as_ref()
                .is_some_and(|form| form.book_id == book.id)
            {
                state.edit_form = None;
                if state.navigation.modal == Some(Modal::EditBook) {
                    state.navigation = state.navigation.close_modal();
                }
            }
            post_info(&mut state, format!("Updated \"{}\"", book.title));
            if state.selected_id() == Some(book.id) {
                commands.push(request_detail(&mut state, book.id));
            }
            commands.push(request_catalog(&mut state));
        }
        UiEvent::BookDeleted { book_id } => {
            if state.selected_id() == Some(book_id) {
                close_detail(&mut state);
            }
            post_info(&mut state, "Book deleted".to_string());
            commands.push(request_catalog(&mut state));
        }
        UiEvent::ReviewAdded { book_id, review } => {
            post_info(&mut state, format!("Review by {} added", review.user_name));
            if state.selected_id() == Some(book_id) {
                state.review_form = ReviewForm::default();
                commands.push(request_detail(&mut state, book_id));
            }
        }
        UiEvent::CommandNotQueued { command, reason } => {
            if let BackendCommand::Search { generation, .. } = &command {
                if *generation == state.generations.search {
                    state.search_loading = false;
                }
            }
            if command.is_mutation() {
                state.notice = Some(Notice::error(reason.clone()));
            }
            state.status = reason;
        }
        UiEvent::Error(err) => {
            state.notice = Some(Notice::error(err.user_message()));
        }
    }

    Transition { state, commands }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
