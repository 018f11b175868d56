//! Tab bodies, the detail side panel and modal windows. Widgets edit a copy of
//! the snapshot's field and report changes as actions.

use eframe::egui;
use shared::domain::{BookId, Rating};
use view_state::{
    forms::{CreateFormPatch, EditFormPatch, ReviewFormPatch},
    view::{catalog_cards, external_cards, rating_label},
    UserAction, ViewState,
};

fn single_line(ui: &mut egui::Ui, label: &str, value: &str) -> Option<String> {
    let mut buffer = value.to_string();
    ui.label(label);
    let changed = ui.text_edit_singleline(&mut buffer).changed();
    ui.end_row();
    changed.then_some(buffer)
}

fn multi_line(ui: &mut egui::Ui, label: &str, value: &str) -> Option<String> {
    let mut buffer = value.to_string();
    ui.label(label);
    let changed = ui.text_edit_multiline(&mut buffer).changed();
    ui.end_row();
    changed.then_some(buffer)
}

pub fn catalog_tab(state: &ViewState, ui: &mut egui::Ui, actions: &mut Vec<UserAction>) {
    ui.horizontal(|ui| {
        ui.heading("My Books");
        if let Some(total) = state.catalog_total {
            ui.weak(format!("{total} in catalog"));
        }
        if ui.button("Refresh").clicked() {
            actions.push(UserAction::Start);
        }
    });
    ui.separator();

    let cards = catalog_cards(state);
    if cards.is_empty() {
        ui.weak("No books yet. Add one or import from search.");
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for card in cards {
                ui.push_id(card.id.0, |ui| {
                    ui.group(|ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.strong(&card.title);
                                ui.label(format!("by {}", card.author));
                                ui.weak(format!("{} · {}", card.rating_label, card.reviews_label));
                            });
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                let selected = state.selected_id() == Some(card.id);
                                if ui.selectable_label(selected, "Details").clicked() {
                                    actions.push(UserAction::OpenBook(card.id));
                                }
                            });
                        });
                    });
                });
            }
        });
}

pub fn detail_panel(state: &ViewState, ctx: &egui::Context, actions: &mut Vec<UserAction>) {
    let Some(book) = &state.selection else {
        return;
    };
    egui::SidePanel::right("book_detail")
        .resizable(true)
        .default_width(380.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(&book.title);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            actions.push(UserAction::CloseDetail);
                        }
                    });
                });
                ui.label(format!("by {}", book.author));
                if let Some(isbn) = book.isbn.as_deref().filter(|isbn| !isbn.is_empty()) {
                    ui.weak(format!("ISBN {isbn}"));
                }
                if let Some(cover) = book.cover_url.as_deref().filter(|url| !url.is_empty()) {
                    ui.hyperlink_to("Cover image", cover);
                }
                if let Some(description) = book.description.as_deref().filter(|d| !d.is_empty()) {
                    ui.add_space(4.0);
                    ui.label(description);
                }
                ui.add_space(4.0);
                ui.label(format!("Rating: {}", rating_label(book)));

                ui.horizontal(|ui| {
                    if ui.button("Edit").clicked() {
                        actions.push(UserAction::BeginEdit);
                    }
                    if ui.button("Delete").clicked() {
                        actions.push(UserAction::RequestDelete);
                    }
                });

                ui.separator();
                ui.strong(format!("Reviews ({})", book.reviews.len()));
                if book.reviews.is_empty() {
                    ui.weak("No reviews yet.");
                }
                for review in &book.reviews {
                    ui.push_id(review.id.0, |ui| {
                        ui.group(|ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal(|ui| {
                                ui.strong(&review.user_name);
                                ui.label(review.rating.stars());
                            });
                            if let Some(comment) = &review.comment {
                                ui.label(comment);
                            }
                        });
                    });
                }

                ui.separator();
                review_form(state, ui, actions);
            });
        });
}

fn review_form(state: &ViewState, ui: &mut egui::Ui, actions: &mut Vec<UserAction>) {
    let form = &state.review_form;
    ui.strong("Add a review");
    egui::Grid::new("review_form").num_columns(2).show(ui, |ui| {
        if let Some(user_name) = single_line(ui, "Name", &form.user_name) {
            actions.push(UserAction::UpdateReviewForm(ReviewFormPatch {
                user_name: Some(user_name),
                ..ReviewFormPatch::default()
            }));
        }

        ui.label("Rating");
        let mut rating = form.rating;
        egui::ComboBox::from_id_salt("review_rating")
            .selected_text(rating.stars())
            .show_ui(ui, |ui| {
                for option in Rating::ALL {
                    ui.selectable_value(&mut rating, option, option.stars());
                }
            });
        ui.end_row();
        if rating != form.rating {
            actions.push(UserAction::UpdateReviewForm(ReviewFormPatch {
                rating: Some(rating),
                ..ReviewFormPatch::default()
            }));
        }

        if let Some(comment) = multi_line(ui, "Comment", &form.comment) {
            actions.push(UserAction::UpdateReviewForm(ReviewFormPatch {
                comment: Some(comment),
                ..ReviewFormPatch::default()
            }));
        }
    });
    if ui.button("Submit review").clicked() {
        actions.push(UserAction::SubmitReview);
    }
}

pub fn search_tab(state: &ViewState, ui: &mut egui::Ui, actions: &mut Vec<UserAction>) {
    ui.heading("Search Open Library");
    ui.horizontal(|ui| {
        let mut query = state.search_query.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Title, author or ISBN")
                .desired_width(320.0),
        );
        if response.changed() {
            actions.push(UserAction::EditSearchQuery(query));
        }
        let submitted =
            response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
        if ui
            .add_enabled(!state.search_loading, egui::Button::new("Search"))
            .clicked()
            || submitted
        {
            actions.push(UserAction::SubmitSearch);
        }
        if state.search_loading {
            ui.spinner();
        }
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for card in external_cards(state) {
                ui.push_id(card.index, |ui| {
                    ui.group(|ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.strong(&card.title);
                                ui.label(format!("by {}", card.author));
                                ui.weak(format!("First published: {}", card.year_label));
                                if let Some(cover) = &card.cover_url {
                                    ui.hyperlink_to("Cover image", cover);
                                }
                            });
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.button("Import").clicked() {
                                    actions.push(UserAction::ImportResult(card.index));
                                }
                            });
                        });
                    });
                });
            }
        });
}

pub fn add_tab(state: &ViewState, ui: &mut egui::Ui, actions: &mut Vec<UserAction>) {
    let form = &state.create_form;
    ui.heading("Add a book");
    egui::Grid::new("create_form").num_columns(2).show(ui, |ui| {
        let patch = CreateFormPatch {
            title: single_line(ui, "Title *", &form.title),
            author: single_line(ui, "Author *", &form.author),
            isbn: single_line(ui, "ISBN", &form.isbn),
            description: multi_line(ui, "Description", &form.description),
            cover_url: single_line(ui, "Cover URL", &form.cover_url),
        };
        if patch != CreateFormPatch::default() {
            actions.push(UserAction::UpdateCreateForm(patch));
        }
    });
    if ui.button("Add book").clicked() {
        actions.push(UserAction::SubmitCreate);
    }
}

pub fn edit_window(state: &ViewState, ctx: &egui::Context, actions: &mut Vec<UserAction>) {
    let Some(form) = &state.edit_form else {
        return;
    };
    egui::Window::new("Edit book")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.weak("Leave a field blank to keep its current value.");
            egui::Grid::new("edit_form").num_columns(2).show(ui, |ui| {
                let patch = EditFormPatch {
                    title: single_line(ui, "Title", &form.title),
                    author: single_line(ui, "Author", &form.author),
                };
                if patch != EditFormPatch::default() {
                    actions.push(UserAction::UpdateEditForm(patch));
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    actions.push(UserAction::SubmitEdit);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(UserAction::CancelEdit);
                }
            });
        });
}

pub fn confirm_delete_window(
    state: &ViewState,
    book_id: BookId,
    ctx: &egui::Context,
    actions: &mut Vec<UserAction>,
) {
    let title = state
        .selection
        .as_ref()
        .filter(|book| book.id == book_id)
        .map(|book| book.title.as_str())
        .unwrap_or("this book");
    egui::Window::new("Delete book?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Delete \"{title}\" and all of its reviews?"));
            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() {
                    actions.push(UserAction::ConfirmDelete);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(UserAction::CancelDelete);
                }
            });
        });
}
