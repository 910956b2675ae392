use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::CatalogClient;
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod config;
mod controller;
#[cfg(test)]
mod test_support;
mod ui;

use backend_bridge::commands::BackendCommand;
use config::{load_settings, Settings};
use controller::events::UiEvent;
use ui::{spawn_line_reader, AdminApp};

/// Terminal admin for a remote product catalog.
#[derive(Parser, Debug)]
#[command(name = "catalog-admin")]
struct Args {
    /// Config file (defaults to ./admin.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Collection endpoint of the catalog API.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: Option<u64>,
    /// Directory that receives products_page_<n>.csv exports.
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.api_url {
            settings.api_url = v;
        }
        if let Some(v) = self.page_size.and_then(|size| usize::try_from(size).ok()) {
            settings.page_size = v;
        }
        if let Some(v) = self.export_dir {
            settings.export_dir = v;
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    args.apply(&mut settings);
    init_tracing(&settings.log_filter);

    let client = CatalogClient::new(&settings.api_url).context("failed to set up catalog client")?;
    tracing::info!(api_url = %client.collection_url(), page_size = settings.page_size, "starting catalog admin");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let worker = backend_bridge::runtime::launch(client, cmd_rx, ui_tx);

    let mut app = AdminApp::new(cmd_tx, ui_rx, &settings);
    app.start();
    let lines = spawn_line_reader(io::BufReader::new(io::stdin()));
    app.run(lines, io::stdout().lock())?;

    tracing::debug!(
        products = app.state().store().products().len(),
        "catalog admin exiting"
    );
    drop(app);
    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_loaded_settings() {
        let args = Args::parse_from([
            "catalog-admin",
            "--api-url",
            "http://localhost:3000/products",
            "--page-size",
            "25",
        ]);
        let mut settings = Settings::default();

        args.apply(&mut settings);

        assert_eq!(settings.api_url, "http://localhost:3000/products");
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.export_dir, PathBuf::from("."));
    }

    #[test]
    fn zero_page_size_flag_is_rejected() {
        assert!(Args::try_parse_from(["catalog-admin", "--page-size", "0"]).is_err());
    }
}
