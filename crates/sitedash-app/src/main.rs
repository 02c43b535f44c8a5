//! Main application entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use sitedash_app::{parse_script, App, AppConfig, ShortcutRegistry};
use sitedash_core::storage::{create_default_storage, AutoSaveManager, FileStorage, Storage};

/// Replay dashboard input and print the resulting layout as JSON.
#[derive(Parser, Debug)]
#[command(name = "sitedash", version)]
struct Cli {
    /// Dashboard configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Widget catalog JSON; the built-in catalog when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// JSON array of key presses, focus changes and dashboard events.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Viewport width in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Installation or user key the layout is saved under.
    #[arg(long)]
    layout_id: Option<String>,
    /// Directory for saved layouts; the platform data directory when omitted.
    #[arg(long)]
    save_dir: Option<PathBuf>,
    /// Do not load or save layouts.
    #[arg(long)]
    no_save: bool,
    /// Print the saved layout ids and exit.
    #[arg(long, conflicts_with = "no_save")]
    list: bool,
    /// Delete the saved layout before replaying, starting from catalog defaults.
    #[arg(long, conflicts_with = "no_save")]
    reset: bool,
    /// Print keyboard shortcuts and exit.
    #[arg(long)]
    shortcuts: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.shortcuts {
        ShortcutRegistry::print_all();
        return Ok(());
    }

    log::info!("Starting SiteDash");

    let mut config = AppConfig::load(cli.config.as_deref(), cli.catalog.as_deref())?;
    config.viewport_width = cli.width;

    let steps = match &cli.script {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            parse_script(&json)?
        }
        None => Vec::new(),
    };

    let mut app: App<FileStorage> = App::new(config);
    if !cli.no_save {
        let storage = match cli.save_dir {
            Some(dir) => Arc::new(FileStorage::new(dir)?),
            None => create_default_storage()?,
        };
        if cli.list {
            let mut ids = pollster::block_on(storage.list())?;
            ids.sort();
            for id in ids {
                println!("{}", id);
            }
            return Ok(());
        }
        let mut manager = AutoSaveManager::with_config(storage, app.dashboard().config());
        manager.set_layout_id(cli.layout_id);
        app = app.with_autosave(manager);
        if cli.reset {
            pollster::block_on(app.reset_saved())?;
        } else {
            pollster::block_on(app.restore_saved())?;
        }
    }

    let summary = pollster::block_on(app.run(steps))?;
    log::info!(
        "Replayed {} events: {} layout changes, {} saves",
        summary.events,
        summary.layout_changes,
        summary.saves
    );

    println!("{}", serde_json::to_string_pretty(&app.report())?);
    Ok(())
}
