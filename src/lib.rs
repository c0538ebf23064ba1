pub mod commands;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

use crate::commands::mods::StateChange;
use crate::commands::{global, mods, Cli, Command};
use crate::config::AppSettings;
use crate::core::repository::ModRepository;
use crate::models::error::SError;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, warn};

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let settings = match AppSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Unable to read settings, using defaults: {e}");
            AppSettings::default()
        }
    };

    let _guard = utils::logging::init(cli.verbose || settings.verbose, settings.log_dir.as_deref());

    match dispatch(cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(kind = %e.kind(), "{e}");
            eprintln!("Failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli, settings: &AppSettings) -> Result<(), SError> {
    let repo = ModRepository::from_resolver(|| match cli.root {
        Some(root) => Ok(root),
        None => settings.resolve_storage_root(),
    })?;

    let creates_or_ignores_root = matches!(
        cli.command,
        Command::Path { .. } | Command::Install { .. } | Command::Config { .. }
    );
    if !repo.has_root() && !creates_or_ignores_root {
        warn!("mods folder {} does not exist", repo.root());
    }

    match cli.command {
        Command::List { json } => mods::list(&repo, json),
        Command::Enable { selector } => mods::change_state(&repo, &selector, StateChange::Enable),
        Command::Disable { selector } => {
            mods::change_state(&repo, &selector, StateChange::Disable)
        }
        Command::Toggle { selector } => mods::change_state(&repo, &selector, StateChange::Toggle),
        Command::Install { path } => mods::install(&repo, &path),
        Command::Uninstall { selector, yes } => mods::uninstall(&repo, &selector, yes),
        Command::Pack { selector, output } => {
            let out_dir = match output {
                Some(dir) => dir,
                None => settings.resolve_pack_output_dir()?,
            };
            mods::pack(&repo, &selector, &out_dir)
        }
        Command::Path { create } => global::path(&repo, create),
        Command::Config { set_root } => global::config(settings, set_root),
    }
}
