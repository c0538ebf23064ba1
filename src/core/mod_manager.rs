use crate::models::error::{IoContext, SError};
use crate::models::mod_dto::ModRecord;
use crate::models::paths::ManifestPaths;
use camino::Utf8Path;
use tracing::info;

const BOTH_MANIFESTS: &str = "both info.json and info.json.DISABLED exist";
const NO_MANIFEST: &str = "neither info.json nor info.json.DISABLED exists";

/// Enables a mod by renaming `info.json.DISABLED` to `info.json`.
pub fn enable(record: &mut ModRecord) -> Result<(), SError> {
    let paths = ManifestPaths::new(record.directory());
    let folder = record.folder_name().to_string();

    match (paths.enabled.exists(), paths.disabled.exists()) {
        (true, true) => Err(SError::InconsistentState {
            folder,
            detail: BOTH_MANIFESTS,
        }),
        (true, false) => Err(SError::AlreadyEnabled { folder }),
        (false, false) => Err(SError::InconsistentState {
            folder,
            detail: NO_MANIFEST,
        }),
        (false, true) => {
            std::fs::rename(&paths.disabled, &paths.enabled).at(&paths.disabled)?;
            record.set_enabled(true);
            info!("{} was enabled", record.title());
            Ok(())
        }
    }
}

/// Disables a mod by renaming `info.json` to `info.json.DISABLED`.
pub fn disable(record: &mut ModRecord) -> Result<(), SError> {
    let paths = ManifestPaths::new(record.directory());
    let folder = record.folder_name().to_string();

    match (paths.enabled.exists(), paths.disabled.exists()) {
        (true, true) => Err(SError::InconsistentState {
            folder,
            detail: BOTH_MANIFESTS,
        }),
        (false, true) => Err(SError::AlreadyDisabled { folder }),
        (false, false) => Err(SError::InconsistentState {
            folder,
            detail: NO_MANIFEST,
        }),
        (true, false) => {
            std::fs::rename(&paths.enabled, &paths.disabled).at(&paths.enabled)?;
            record.set_enabled(false);
            info!("{} was disabled", record.title());
            Ok(())
        }
    }
}

/// Flips the state the record was scanned with.
pub fn toggle(record: &mut ModRecord) -> Result<(), SError> {
    if record.is_enabled() {
        disable(record)
    } else {
        enable(record)
    }
}

/// Deletes the mod directory and everything in it. Irreversible.
pub fn uninstall(root: &Utf8Path, record: &ModRecord) -> Result<(), SError> {
    let dir = record.directory();

    // Only immediate children of the storage root are ever deleted
    if dir.parent() != Some(root) || record.folder_name().is_empty() {
        return Err(SError::OutsideStorageRoot {
            path: dir.to_owned(),
        });
    }

    if !dir.is_dir() {
        return Err(SError::NotFound {
            path: dir.to_owned(),
        });
    }

    std::fs::remove_dir_all(dir).at(dir)?;
    info!("{} was uninstalled", record.title());
    Ok(())
}
