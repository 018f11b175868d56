//! UI layer for the catalog desktop client: app shell, tab panels and modal windows.

pub mod app;
mod panels;

pub use app::CatalogApp;
