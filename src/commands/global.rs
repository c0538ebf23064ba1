use crate::config::{self, AppSettings};
use crate::core::repository::ModRepository;
use crate::models::error::SError;
use camino::Utf8PathBuf;

/// Prints the mods folder, creating it first when asked.
pub fn path(repo: &ModRepository, create: bool) -> Result<(), SError> {
    if create && !repo.has_root() {
        repo.ensure_root()?;
        println!("Mod path did not exist and was created");
    } else if !repo.has_root() {
        println!("Mod path does not exist yet, run with --create to create it");
    }
    println!("{}", repo.root());
    Ok(())
}

/// Shows where the settings live and what they resolve to, after storing a
/// new mods folder override if one is given.
pub fn config(settings: &AppSettings, set_root: Option<Utf8PathBuf>) -> Result<(), SError> {
    let updated;
    let settings = match set_root {
        Some(root) => {
            updated = AppSettings {
                storage_root: Some(config::absolute(&root)),
                ..settings.clone()
            };
            updated.save()?;
            println!("Mods folder override saved");
            &updated
        }
        None => settings,
    };
    println!("Config file:    {}", AppSettings::config_path()?);
    println!("Mods folder:    {}", settings.resolve_storage_root()?);
    println!("Pack output:    {}", settings.resolve_pack_output_dir()?);
    match &settings.log_dir {
        Some(dir) => println!("Log directory:  {dir}"),
        None => println!("Log directory:  (file logging disabled)"),
    }
    Ok(())
}
