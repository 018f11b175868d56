use shared::{
    domain::{Rating, ReviewId},
    protocol::{Book, BookPage, ExternalSearchRecord, Review},
};

use super::*;
use crate::{
    events::{UiError, UiErrorContext},
    forms::{CreateFormPatch, EditFormPatch, ReviewFormPatch},
    state::NoticeLevel,
};

fn book(id: i64, title: &str, author: &str) -> Book {
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

fn review(id: i64, book_id: i64, rating: Rating) -> Review {
    Review {
        id: ReviewId(id),
        book_id: Some(BookId(book_id)),
        user_name: "Ana".to_string(),
        rating,
        comment: None,
        created_at: None,
    }
}

fn page(books: Vec<Book>) -> BookPage {
    BookPage {
        total: Some(books.len() as u64),
        pages: Some(1),
        current_page: Some(1),
        books,
    }
}

fn apply(state: ViewState, event: impl Into<AppEvent>) -> Transition {
    reduce(state, event.into())
}

/// Runs a sequence and keeps only the final state.
fn apply_all(state: ViewState, events: Vec<AppEvent>) -> ViewState {
    events
        .into_iter()
        .fold(state, |state, event| reduce(state, event).state)
}

fn with_selection(book: Book) -> ViewState {
    ViewState {
        selection: Some(book),
        ..ViewState::default()
    }
}

#[test]
fn start_requests_first_catalog_page() {
    let Transition { state, commands } = apply(ViewState::new(7), UserAction::Start);

    assert_eq!(state.generations.catalog, 1);
    assert_eq!(
        commands,
        vec![BackendCommand::ListBooks {
            generation: 1,
            query: ListQuery::first_page(7),
        }]
    );
}

#[test]
fn stale_catalog_page_is_dropped() {
    let state = apply_all(
        ViewState::default(),
        vec![UserAction::Start.into(), UserAction::Start.into()],
    );
    assert_eq!(state.generations.catalog, 2);

    let state = apply(
        state,
        UiEvent::CatalogLoaded {
            generation: 1,
            page: page(vec![book(1, "Old", "A")]),
        },
    )
    .state;
    assert!(state.catalog.is_empty());

    let state = apply(
        state,
        UiEvent::CatalogLoaded {
            generation: 2,
            page: page(vec![book(1, "New", "A"), book(2, "Other", "B")]),
        },
    )
    .state;
    assert_eq!(state.catalog.len(), 2);
    assert_eq!(state.catalog_total, Some(2));
}

#[test]
fn opening_another_book_drops_the_earlier_fetch() {
    let state = apply_all(
        ViewState::default(),
        vec![
            UserAction::OpenBook(BookId(1)).into(),
            UserAction::OpenBook(BookId(2)).into(),
            UiEvent::DetailLoaded {
                generation: 2,
                book: book(2, "Second", "B"),
            }
            .into(),
            UiEvent::DetailLoaded {
                generation: 1,
                book: book(1, "First", "A"),
            }
            .into(),
        ],
    );

    assert_eq!(state.selected_id(), Some(BookId(2)));
}

#[test]
fn closing_detail_ignores_a_late_fetch() {
    let state = apply_all(
        ViewState::default(),
        vec![
            UserAction::OpenBook(BookId(1)).into(),
            UserAction::CloseDetail.into(),
            UiEvent::DetailLoaded {
                generation: 1,
                book: book(1, "First", "A"),
            }
            .into(),
        ],
    );

    assert_eq!(state.selection, None);
}

#[test]
fn request_delete_only_opens_confirmation() {
    let Transition { state, commands } =
        apply(with_selection(book(3, "T", "A")), UserAction::RequestDelete);

    assert!(commands.is_empty());
    assert_eq!(state.navigation.pending_delete(), Some(BookId(3)));

    let Transition { state, commands } = apply(state, UserAction::CancelDelete);
    assert!(commands.is_empty());
    assert_eq!(state.navigation.modal, None);
    assert_eq!(state.selected_id(), Some(BookId(3)));
}

#[test]
fn confirmed_delete_clears_selection_and_refreshes_once() {
    let state = apply(with_selection(book(3, "T", "A")), UserAction::RequestDelete).state;
    let Transition { state, commands } = apply(state, UserAction::ConfirmDelete);
    assert_eq!(
        commands,
        vec![BackendCommand::DeleteBook {
            book_id: BookId(3)
        }]
    );

    let Transition { state, commands } = apply(
        state,
        UiEvent::BookDeleted {
            book_id: BookId(3),
        },
    );
    assert_eq!(state.selection, None);
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], BackendCommand::ListBooks { .. }));
}

#[test]
fn deleting_a_book_that_is_no_longer_selected_keeps_the_current_view() {
    let state = with_selection(book(5, "Kept", "A"));
    let Transition { state, commands } = apply(
        state,
        UiEvent::BookDeleted {
            book_id: BookId(3),
        },
    );

    assert_eq!(state.selected_id(), Some(BookId(5)));
    assert_eq!(commands.len(), 1);
}

#[test]
fn blank_search_issues_nothing() {
    let state = apply(
        ViewState::default(),
        UserAction::EditSearchQuery("   ".to_string()),
    )
    .state;
    let Transition { state, commands } = apply(state, UserAction::SubmitSearch);

    assert!(commands.is_empty());
    assert!(!state.search_loading);
    assert_eq!(state.generations.search, 0);
}

#[test]
fn search_sets_loading_until_current_results_arrive() {
    let state = apply(
        ViewState::default(),
        UserAction::EditSearchQuery(" dune ".to_string()),
    )
    .state;
    let Transition { state, commands } = apply(state, UserAction::SubmitSearch);
    assert!(state.search_loading);
    assert_eq!(
        commands,
        vec![BackendCommand::Search {
            generation: 1,
            query: " dune ".to_string(),
        }]
    );

    let state = apply(state, UserAction::SubmitSearch).state;
    let results = vec![ExternalSearchRecord {
        title: "Dune".to_string(),
        ..ExternalSearchRecord::default()
    }];

    let state = apply(
        state,
        UiEvent::SearchCompleted {
            generation: 1,
            results: results.clone(),
        },
    )
    .state;
    assert!(state.search_loading);
    assert!(state.external_results.is_empty());

    let state = apply(
        state,
        UiEvent::SearchCompleted {
            generation: 2,
            results,
        },
    )
    .state;
    assert!(!state.search_loading);
    assert_eq!(state.external_results.len(), 1);
}

#[test]
fn blank_submit_keeps_pending_search_loading() {
    let state = apply_all(
        ViewState::default(),
        vec![
            UserAction::EditSearchQuery("dune".to_string()).into(),
            UserAction::SubmitSearch.into(),
            UserAction::EditSearchQuery(String::new()).into(),
        ],
    );

    let Transition { state, commands } = apply(state, UserAction::SubmitSearch);
    assert!(commands.is_empty());
    assert!(state.search_loading);
    assert_eq!(state.generations.search, 1);

    let state = apply(
        state,
        UiEvent::SearchCompleted {
            generation: 1,
            results: Vec::new(),
        },
    )
    .state;
    assert!(!state.search_loading);
}

#[test]
fn failed_search_clears_loading_without_a_notice() {
    let state = apply_all(
        ViewState::default(),
        vec![
            UserAction::EditSearchQuery("dune".to_string()).into(),
            UserAction::SubmitSearch.into(),
            UiEvent::SearchFailed { generation: 1 }.into(),
        ],
    );

    assert!(!state.search_loading);
    assert!(state.notice.is_none());
}

#[test]
fn import_creates_from_the_selected_result_then_shows_catalog() {
    let state = ViewState {
        external_results: vec![ExternalSearchRecord {
            title: "Dune".to_string(),
            author_name: Some(vec!["Frank Herbert".to_string()]),
            ..ExternalSearchRecord::default()
        }],
        ..ViewState::default()
    };
    let state = apply(state, UserAction::SelectTab(Tab::Search)).state;

    let Transition { state, commands } = apply(state, UserAction::ImportResult(0));
    let [BackendCommand::CreateBook { draft, origin }] = commands.as_slice() else {
        panic!("expected one create command, got {commands:?}");
    };
    assert_eq!(*origin, CreateOrigin::Import);
    assert_eq!(draft.title, "Dune");
    assert_eq!(draft.author, "Frank Herbert");

    let Transition { state, commands } = apply(
        state,
        UiEvent::BookCreated {
            book: book(9, "Dune", "Frank Herbert"),
            origin: CreateOrigin::Import,
        },
    );
    assert_eq!(state.navigation.tab, Tab::MyBooks);
    assert!(matches!(commands[..], [BackendCommand::ListBooks { .. }]));
}

#[test]
fn import_index_out_of_range_is_ignored() {
    let Transition { commands, .. } = apply(ViewState::default(), UserAction::ImportResult(3));
    assert!(commands.is_empty());
}

#[test]
fn created_book_resets_the_form_and_refreshes() {
    let state = apply_all(
        ViewState::default(),
        vec![
            UserAction::SelectTab(Tab::Add).into(),
            UserAction::UpdateCreateForm(CreateFormPatch {
                title: Some("T".to_string()),
                author: Some("A".to_string()),
                ..CreateFormPatch::default()
            })
            .into(),
        ],
    );
    let Transition { state, commands } = apply(state, UserAction::SubmitCreate);
    assert!(matches!(
        commands[..],
        [BackendCommand::CreateBook {
            origin: CreateOrigin::Form,
            ..
        }]
    ));
    assert_eq!(state.create_form.title, "T");

    let Transition { state, commands } = apply(
        state,
        UiEvent::BookCreated {
            book: book(1, "T", "A"),
            origin: CreateOrigin::Form,
        },
    );
    assert_eq!(state.create_form, CreateForm::default());
    assert_eq!(state.navigation.tab, Tab::Add);
    assert_eq!(commands.len(), 1);
    assert_eq!(
        state.notice.map(|notice| notice.level),
        Some(NoticeLevel::Info)
    );
}

#[test]
fn leaving_add_tab_discards_the_draft() {
    let state = apply_all(
        ViewState::default(),
        vec![
            UserAction::SelectTab(Tab::Add).into(),
            UserAction::UpdateCreateForm(CreateFormPatch {
                title: Some("Draft".to_string()),
                ..CreateFormPatch::default()
            })
            .into(),
            UserAction::SelectTab(Tab::Search).into(),
        ],
    );

    assert_eq!(state.create_form, CreateForm::default());
}

#[test]
fn create_without_author_raises_blocking_notice() {
    let state = apply(
        ViewState::default(),
        UserAction::UpdateCreateForm(CreateFormPatch {
            title: Some("T".to_string()),
            ..CreateFormPatch::default()
        }),
    )
    .state;
    let Transition { state, commands } = apply(state, UserAction::SubmitCreate);

    assert!(commands.is_empty());
    assert!(state.has_blocking_notice());
    assert_eq!(
        state.notice.as_ref().map(|notice| notice.message.as_str()),
        Some("Author is required")
    );
}

#[test]
fn blocking_notice_swallows_actions_until_dismissed() {
    let state = ViewState {
        notice: Some(Notice::error("boom")),
        ..ViewState::default()
    };

    let Transition { state, commands } = apply(state, UserAction::Start);
    assert!(commands.is_empty());
    assert_eq!(state.generations.catalog, 0);

    let state = apply(state, UserAction::DismissNotice).state;
    assert!(state.notice.is_none());
    let Transition { commands, .. } = apply(state, UserAction::Start);
    assert_eq!(commands.len(), 1);
}

#[test]
fn success_notice_does_not_hide_pending_error() {
    let state = ViewState {
        notice: Some(Notice::error("boom")),
        ..ViewState::default()
    };
    let state = apply(
        state,
        UiEvent::BookDeleted {
            book_id: BookId(1),
        },
    )
    .state;

    assert_eq!(state.notice, Some(Notice::error("boom")));
}

#[test]
fn edit_submits_both_fields_and_refetches_selected_book() {
    let current = book(4, "Old", "Writer");
    let state = apply_all(
        with_selection(current.clone()),
        vec![
            UserAction::BeginEdit.into(),
            UserAction::UpdateEditForm(EditFormPatch {
                title: Some("New".to_string()),
                author: Some(String::new()),
            })
            .into(),
        ],
    );
    assert_eq!(state.navigation.modal, Some(Modal::EditBook));

    let Transition { state, commands } = apply(state, UserAction::SubmitEdit);
    let [BackendCommand::UpdateBook { book_id, update }] = commands.as_slice() else {
        panic!("expected one update command, got {commands:?}");
    };
    assert_eq!(*book_id, BookId(4));
    assert_eq!(update.title.as_deref(), Some("New"));
    assert_eq!(update.author.as_deref(), Some("Writer"));

    let Transition { state, commands } = apply(
        state,
        UiEvent::BookUpdated {
            book: book(4, "New", "Writer"),
        },
    );
    assert_eq!(state.edit_form, None);
    assert_eq!(state.navigation.modal, None);
    assert!(matches!(
        commands[..],
        [
            BackendCommand::FetchBook {
                book_id: BookId(4),
                ..
            },
            BackendCommand::ListBooks { .. }
        ]
    ));
}

#[test]
fn update_for_a_closed_book_does_not_reopen_it() {
    let Transition { state, commands } = apply(
        ViewState::default(),
        UiEvent::BookUpdated {
            book: book(4, "New", "Writer"),
        },
    );

    assert_eq!(state.selection, None);
    assert!(matches!(commands[..], [BackendCommand::ListBooks { .. }]));
}

#[test]
fn review_submission_carries_chosen_rating() {
    let state = apply(
        with_selection(book(2, "T", "A")),
        UserAction::UpdateReviewForm(ReviewFormPatch {
            user_name: Some("Ana".to_string()),
            rating: Some(Rating::Three),
            comment: Some("Good".to_string()),
        }),
    )
    .state;

    let Transition { state, commands } = apply(state, UserAction::SubmitReview);
    let [BackendCommand::AddReview { book_id, review: draft }] = commands.as_slice() else {
        panic!("expected one review command, got {commands:?}");
    };
    assert_eq!(*book_id, BookId(2));
    assert_eq!(draft.rating, Rating::Three);
    assert_eq!(draft.comment.as_deref(), Some("Good"));

    let Transition { state, commands } = apply(
        state,
        UiEvent::ReviewAdded {
            book_id: BookId(2),
            review: review(1, 2, Rating::Three),
        },
    );
    assert_eq!(state.review_form.user_name, "");
    assert_eq!(state.review_form.rating, Rating::Five);
    assert!(matches!(
        commands[..],
        [BackendCommand::FetchBook {
            book_id: BookId(2),
            ..
        }]
    ));
}

#[test]
fn review_for_a_book_no_longer_selected_keeps_current_draft() {
    let state = apply(
        with_selection(book(5, "Other", "B")),
        UserAction::UpdateReviewForm(ReviewFormPatch {
            user_name: Some("Ben".to_string()),
            ..ReviewFormPatch::default()
        }),
    )
    .state;

    let Transition { state, commands } = apply(
        state,
        UiEvent::ReviewAdded {
            book_id: BookId(2),
            review: review(1, 2, Rating::Four),
        },
    );

    assert_eq!(state.review_form.user_name, "Ben");
    assert_eq!(state.selected_id(), Some(BookId(5)));
    assert!(commands.is_empty());
}

#[test]
fn switching_to_another_book_resets_review_form() {
    let state = apply_all(
        with_selection(book(1, "First", "A")),
        vec![
            UserAction::UpdateReviewForm(ReviewFormPatch {
                user_name: Some("Ana".to_string()),
                ..ReviewFormPatch::default()
            })
            .into(),
            UserAction::OpenBook(BookId(2)).into(),
        ],
    );
    let generation = state.generations.detail;
    let state = apply(
        state,
        UiEvent::DetailLoaded {
            generation,
            book: book(2, "Second", "B"),
        },
    )
    .state;

    assert_eq!(state.review_form, ReviewForm::default());
    assert_eq!(state.selected_id(), Some(BookId(2)));
}

#[test]
fn refetch_of_same_book_keeps_review_draft() {
    let state = apply(
        with_selection(book(1, "First", "A")),
        UserAction::UpdateReviewForm(ReviewFormPatch {
            user_name: Some("Ana".to_string()),
            ..ReviewFormPatch::default()
        }),
    )
    .state;
    let state = apply(state, UserAction::OpenBook(BookId(1))).state;
    let generation = state.generations.detail;
    let state = apply(
        state,
        UiEvent::DetailLoaded {
            generation,
            book: book(1, "First", "A"),
        },
    )
    .state;

    assert_eq!(state.review_form.user_name, "Ana");
}

#[test]
fn mutation_error_shows_generic_message() {
    let state = apply(
        ViewState::default(),
        UiEvent::Error(UiError::from_message(
            UiErrorContext::DeleteBook,
            "HTTP 500 from http://localhost:5000/api/books/1",
        )),
    )
    .state;

    let notice = state.notice.expect("notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Could not delete the book. Please try again.");
}

#[test]
fn unqueued_search_rolls_back_loading() {
    let state = apply_all(
        ViewState::default(),
        vec![
            UserAction::EditSearchQuery("dune".to_string()).into(),
            UserAction::SubmitSearch.into(),
        ],
    );
    let state = apply(
        state,
        UiEvent::CommandNotQueued {
            command: BackendCommand::Search {
                generation: 1,
                query: "dune".to_string(),
            },
            reason: "UI command queue is full; please retry".to_string(),
        },
    )
    .state;

    assert!(!state.search_loading);
    assert!(state.notice.is_none());
    assert_eq!(state.status, "UI command queue is full; please retry");
}

#[test]
fn switching_tab_away_from_catalog_closes_detail() {
    let state = apply(
        with_selection(book(1, "First", "A")),
        UserAction::SelectTab(Tab::Search),
    )
    .state;

    assert_eq!(state.selection, None);
    assert_eq!(state.navigation.tab, Tab::Search);
}
