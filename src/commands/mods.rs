use crate::core::repository::ModRepository;
use crate::models::error::SError;
use crate::models::mod_dto::ModRecord;
use crate::utils::progress::WriteProgress;
use camino::Utf8Path;
use tracing::{debug, instrument};

/// Scans and sorts by folder name, the order every listing and index refers to.
pub fn sorted_mods(repo: &ModRepository) -> Result<Vec<ModRecord>, SError> {
    let mut mods = repo.scan()?;
    mods.sort_by_key(|m| m.folder_name().to_lowercase());
    Ok(mods)
}

/// Resolves a folder name, or failing that a 1-based index into [`sorted_mods`].
pub fn select(repo: &ModRepository, selector: &str) -> Result<ModRecord, SError> {
    let mut mods = sorted_mods(repo)?;

    if let Some(pos) = mods.iter().position(|m| m.folder_name() == selector) {
        return Ok(mods.swap_remove(pos));
    }

    match selector.parse::<usize>() {
        Ok(n) if (1..=mods.len()).contains(&n) => Ok(mods.swap_remove(n - 1)),
        _ => Err(SError::NotFound {
            path: repo.root().join(selector),
        }),
    }
}

#[instrument(skip(repo))]
pub fn list(repo: &ModRepository, json: bool) -> Result<(), SError> {
    let mods = sorted_mods(repo)?;

    if json {
        let text =
            serde_json::to_string_pretty(&mods).map_err(|source| SError::Json { source })?;
        println!("{text}");
        return Ok(());
    }

    if mods.is_empty() {
        println!("No mods installed in {}", repo.root());
    }
    for (i, m) in mods.iter().enumerate() {
        let detail = m
            .descriptor()
            .description()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        println!("[{}] {}", i + 1, m.title());
        println!("    Detail:  {detail}");
        println!("    Folder:  {}", m.folder_name());
        println!("    Enabled: {}", if m.is_enabled() { "Yes" } else { "No" });
        println!();
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub enum StateChange {
    Enable,
    Disable,
    Toggle,
}

#[instrument(skip(repo))]
pub fn change_state(repo: &ModRepository, selector: &str, change: StateChange) -> Result<(), SError> {
    let mut record = select(repo, selector)?;
    match change {
        StateChange::Enable => repo.enable(&mut record)?,
        StateChange::Disable => repo.disable(&mut record)?,
        StateChange::Toggle => repo.toggle(&mut record)?,
    }
    println!(
        "{} is now {}",
        record.title(),
        if record.is_enabled() { "enabled" } else { "disabled" }
    );
    Ok(())
}

#[instrument(skip(repo))]
pub fn install(repo: &ModRepository, input: &Utf8Path) -> Result<(), SError> {
    let mut progress = WriteProgress(std::io::stdout());
    let record = repo.install(input, &mut progress)?;
    debug!("installed record: {:?}", record);
    println!(
        "{} installed and enabled successfully in folder '{}'",
        record.title(),
        record.folder_name()
    );
    Ok(())
}

#[instrument(skip(repo))]
pub fn uninstall(repo: &ModRepository, selector: &str, confirmed: bool) -> Result<(), SError> {
    let record = select(repo, selector)?;
    if !confirmed {
        println!("You're about to uninstall {}", record.title());
        println!("This action cannot be undone.");
        println!("Pack or disable the mod instead if you need it later.");
        println!("Re-run with --yes to uninstall.");
        return Ok(());
    }
    repo.uninstall(&record)?;
    println!("{} uninstalled", record.title());
    Ok(())
}

#[instrument(skip(repo))]
pub fn pack(repo: &ModRepository, selector: &str, out_dir: &Utf8Path) -> Result<(), SError> {
    let record = select(repo, selector)?;
    let mut progress = WriteProgress(std::io::stdout());
    let archive = repo.pack_to_file(&record, out_dir, &mut progress)?;
    println!("Mod packed into {archive}");
    Ok(())
}
