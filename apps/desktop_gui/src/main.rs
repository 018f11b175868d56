use std::{path::PathBuf, sync::Arc};

mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{load_settings, SettingsOverrides};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use view_state::{
    runtime::{self, EventSink},
    BackendCommand, Controller, EffectHandler, Store, UiEvent, UserAction, ViewState,
};

use crate::ui::CatalogApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop client for the book catalog")]
struct Args {
    /// TOML settings file; `catalog.toml` in the working directory is used when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    catalog_url: Option<String>,
    #[arg(long)]
    search_url: Option<String>,
    #[arg(long)]
    page_size: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let settings = load_settings(
        args.config.as_deref(),
        SettingsOverrides {
            catalog_url: args.catalog_url,
            search_url: args.search_url,
            page_size: args.page_size,
        },
    )?;
    tracing::info!(
        catalog_url = %settings.catalog_url,
        search_url = %settings.search_url,
        page_size = settings.page_size,
        "starting catalog gui"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let handler = EffectHandler::new(
        Arc::new(settings.catalog_client()),
        Arc::new(settings.search_client()),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Book Catalog")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Book Catalog",
        options,
        Box::new(move |cc| {
            let repaint_ctx = cc.egui_ctx.clone();
            let sink = EventSink::new(ui_tx).with_waker(move || repaint_ctx.request_repaint());
            runtime::launch(cmd_rx, sink, handler);

            let mut store = Store::new(ViewState::new(settings.page_size));
            let render_ctx = cc.egui_ctx.clone();
            store.set_render_hook(move |_| render_ctx.request_repaint());

            let mut controller = Controller::new(store, cmd_tx, ui_rx);
            controller.dispatch(UserAction::Start);
            Ok(Box::new(CatalogApp::new(controller)))
        }),
    )
    .map_err(|err| anyhow!("catalog gui exited with an error: {err}"))
}
