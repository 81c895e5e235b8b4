//! Entry point for the phrasebook browser.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Wire up the document source, speech engine, and notes storage.
//! - Launch the GUI application.

mod app;
mod config;
mod content;
mod loader;
mod notes;
mod speech;
mod storage;
mod voice;

use crate::app::run_app;
use crate::config::load_config;
use crate::loader::DocumentSource;
use crate::speech::EspeakEngine;
use crate::storage::FileStore;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let mut config = load_config(Path::new("conf/config.toml"));
    if let Some(base) = parse_args()? {
        info!(%base, "Content base overridden from the command line");
        config.content_base = base;
    }
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        base = %config.content_base,
        language = %config.language,
        speech = %config.speech_bin,
        "Starting phrasebook browser"
    );

    let source = DocumentSource::from_config(&config.content_base);
    let engine = Arc::new(EspeakEngine::new(
        config.speech_bin.clone(),
        config.speech_rate,
    ));
    let store = Box::new(FileStore::new(config.storage_dir.clone()));
    info!(dir = %store.root().display(), "Notes storage ready");

    run_app(config, source, engine, store).context("Failed to start the GUI")?;
    Ok(())
}

/// A single optional positional argument overrides the content base, so a
/// local checkout can point at another directory or a served endpoint.
fn parse_args() -> Result<Option<String>> {
    let mut args = env::args().skip(1);
    let base = args.next();
    if args.next().is_some() {
        return Err(anyhow!("Usage: phrasedeck [content-base]"));
    }
    Ok(base)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
