use std::sync::Arc;

use eframe::egui;
use view_state::{Controller, Modal, NoticeLevel, Tab, UserAction, ViewState};

use super::panels;

/// Render surface. Draws one snapshot per frame and dispatches whatever the
/// user did only after the frame is laid out.
pub struct CatalogApp {
    controller: Controller,
}

impl CatalogApp {
    pub fn new(controller: Controller) -> Self {
        Self { controller }
    }

    fn process_ui_events(&mut self) {
        let applied = self.controller.drain_backend_events();
        if applied > 0 {
            tracing::trace!(applied, "applied backend events");
        }
    }

    fn show_tab_bar(state: &ViewState, ctx: &egui::Context, actions: &mut Vec<UserAction>) {
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Book Catalog");
                ui.separator();
                for tab in Tab::ALL {
                    if ui
                        .selectable_label(state.navigation.tab == tab, tab.label())
                        .clicked()
                    {
                        actions.push(UserAction::SelectTab(tab));
                    }
                }
            });
        });
    }

    fn show_status_bar(state: &ViewState, ctx: &egui::Context, actions: &mut Vec<UserAction>) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(notice) = &state.notice {
                    if notice.level == NoticeLevel::Info {
                        ui.label(
                            egui::RichText::new(&notice.message).color(egui::Color32::LIGHT_GREEN),
                        );
                        if ui.small_button("x").clicked() {
                            actions.push(UserAction::DismissNotice);
                        }
                        ui.separator();
                    }
                }
                ui.weak(&state.status);
            });
        });
    }

    fn show_error_notice(state: &ViewState, ctx: &egui::Context, actions: &mut Vec<UserAction>) {
        let Some(notice) = state.notice.as_ref().filter(|notice| notice.is_blocking()) else {
            return;
        };
        egui::Window::new("Something went wrong")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&notice.message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    actions.push(UserAction::DismissNotice);
                }
            });
    }

    fn show_modal(state: &ViewState, ctx: &egui::Context, actions: &mut Vec<UserAction>) {
        match state.navigation.modal {
            Some(Modal::EditBook) => panels::edit_window(state, ctx, actions),
            Some(Modal::ConfirmDelete(book_id)) => {
                panels::confirm_delete_window(state, book_id, ctx, actions)
            }
            None => {}
        }
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let state: Arc<ViewState> = self.controller.store().snapshot();
        let mut actions = Vec::new();

        Self::show_tab_bar(&state, ctx, &mut actions);
        Self::show_status_bar(&state, ctx, &mut actions);
        if state.navigation.tab == Tab::MyBooks && state.selection.is_some() {
            panels::detail_panel(&state, ctx, &mut actions);
        }
        egui::CentralPanel::default().show(ctx, |ui| match state.navigation.tab {
            Tab::MyBooks => panels::catalog_tab(&state, ui, &mut actions),
            Tab::Search => panels::search_tab(&state, ui, &mut actions),
            Tab::Add => panels::add_tab(&state, ui, &mut actions),
        });
        Self::show_modal(&state, ctx, &mut actions);
        Self::show_error_notice(&state, ctx, &mut actions);

        for action in actions {
            self.controller.dispatch(action);
        }

        if state.search_loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
