use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

use crate::{catalog::CatalogClient, search::SearchClient, search::DEFAULT_SEARCH_LIMIT};

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_SEARCH_URL: &str = "https://openlibrary.org/search.json";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub catalog_url: String,
    pub search_url: String,
    pub page_size: u32,
    pub search_limit: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.into(),
            search_url: DEFAULT_SEARCH_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub catalog_url: Option<String>,
    pub search_url: Option<String>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    catalog_url: Option<String>,
    search_url: Option<String>,
    page_size: Option<u32>,
    search_limit: Option<usize>,
}

impl ClientSettings {
    pub fn catalog_client(&self) -> CatalogClient {
        CatalogClient::new(self.catalog_url.clone())
    }

    pub fn search_client(&self) -> SearchClient {
        SearchClient::with_http(
            reqwest::Client::new(),
            self.search_url.clone(),
            self.search_limit,
        )
    }
}

/// Defaults, then `config_path` (or `catalog.toml` if present), then the
/// process environment, then `overrides`.
pub fn load_settings(
    config_path: Option<&Path>,
    overrides: SettingsOverrides,
) -> Result<ClientSettings> {
    load_settings_with(config_path, overrides, |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    config_path: Option<&Path>,
    overrides: SettingsOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let file = match config_path {
        Some(path) => Some(read_file_settings(path)?),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Some(read_file_settings(default_path)?)
            } else {
                None
            }
        }
    };
    if let Some(file) = file {
        if let Some(v) = file.catalog_url {
            settings.catalog_url = v;
        }
        if let Some(v) = file.search_url {
            settings.search_url = v;
        }
        if let Some(v) = file.page_size {
            settings.page_size = v;
        }
        if let Some(v) = file.search_limit {
            settings.search_limit = v;
        }
    }

    if let Some(v) = env("CATALOG_URL") {
        settings.catalog_url = v;
    }
    if let Some(v) = env("APP__CATALOG_URL") {
        settings.catalog_url = v;
    }

    if let Some(v) = env("SEARCH_URL") {
        settings.search_url = v;
    }
    if let Some(v) = env("APP__SEARCH_URL") {
        settings.search_url = v;
    }

    if let Some(v) = env("APP__PAGE_SIZE") {
        settings.page_size = v
            .parse()
            .with_context(|| format!("APP__PAGE_SIZE is not a positive integer: '{v}'"))?;
    }
    if let Some(v) = env("APP__SEARCH_LIMIT") {
        settings.search_limit = v
            .parse()
            .with_context(|| format!("APP__SEARCH_LIMIT is not a positive integer: '{v}'"))?;
    }

    if let Some(v) = overrides.catalog_url {
        settings.catalog_url = v;
    }
    if let Some(v) = overrides.search_url {
        settings.search_url = v;
    }
    if let Some(v) = overrides.page_size {
        settings.page_size = v;
    }

    settings.catalog_url = normalize_url("catalog_url", &settings.catalog_url)?;
    settings.search_url = normalize_url("search_url", &settings.search_url)?;
    if settings.page_size == 0 {
        bail!("page_size must be at least 1");
    }
    if settings.search_limit == 0 {
        bail!("search_limit must be at least 1");
    }

    Ok(settings)
}

fn read_file_settings(path: &Path) -> Result<FileSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))
}

fn normalize_url(field: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).with_context(|| format!("{field} is not a valid URL: '{raw}'"))?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
