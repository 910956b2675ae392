use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use client_core::{view::DEFAULT_PAGE_SIZE, DEFAULT_API_URL};

const DEFAULT_CONFIG_FILE: &str = "admin.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub page_size: usize,
    pub export_dir: PathBuf,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            export_dir: PathBuf::from("."),
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then the config file, then environment variables.
///
/// A missing `admin.toml` in the working directory is fine; an explicitly named file must exist.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => apply_file_config(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound && config_path.is_none() => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn apply_file_config(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: toml::Table = toml::from_str(raw)?;
    let text = |key: &str| -> Option<String> {
        file_cfg.get(key).and_then(|value| match value {
            toml::Value::String(v) => Some(v.clone()),
            toml::Value::Integer(v) => Some(v.to_string()),
            _ => None,
        })
    };

    if let Some(v) = text("api_url") {
        settings.api_url = v;
    }
    if let Some(v) = text("page_size").as_deref().and_then(parse_page_size) {
        settings.page_size = v;
    }
    if let Some(v) = text("export_dir") {
        settings.export_dir = PathBuf::from(v);
    }
    if let Some(v) = text("log_filter") {
        settings.log_filter = v;
    }
    Ok(())
}

pub fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("CATALOG_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = var("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = var("APP__PAGE_SIZE").as_deref().and_then(parse_page_size) {
        settings.page_size = v;
    }

    if let Some(v) = var("APP__EXPORT_DIR") {
        settings.export_dir = PathBuf::from(v);
    }

    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

pub fn parse_page_size(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|size| *size > 0)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
