use crate::core::mod_fs::{ManifestState, ModFS};
use crate::models::error::{IoContext, SError};
use crate::models::mod_dto::ModRecord;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

/// A subdirectory of the storage root that could not be turned into a record.
#[derive(Debug)]
pub struct SkippedEntry {
    pub directory: Utf8PathBuf,
    pub error: SError,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub mods: Vec<ModRecord>,
    pub skipped: Vec<SkippedEntry>,
}

/// Builds records for every immediate subdirectory of `root`.
///
/// A missing root yields an empty report. Broken entries are logged and
/// collected in `skipped`; they never abort the scan. Order follows the
/// filesystem.
pub fn scan(root: &Utf8Path) -> Result<ScanReport, SError> {
    let mut report = ScanReport::default();

    if !root.is_dir() {
        debug!("mods folder {root} does not exist, nothing installed");
        return Ok(report);
    }

    let entries = std::fs::read_dir(root).at(root)?;

    for entry in entries {
        let entry = entry.at(root)?;
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.path()) else {
            warn!("Skipping non UTF-8 entry in mod folder: {:?}", entry.path());
            continue;
        };
        if !path.is_dir() {
            continue;
        }

        match read_record(&path) {
            Ok(record) => report.mods.push(record),
            Err(error) => {
                warn!("Skipping {}: {error}", path.file_name().unwrap_or_default());
                report.skipped.push(SkippedEntry {
                    directory: path,
                    error,
                });
            }
        }
    }

    Ok(report)
}

/// Builds the record of a single mod directory.
pub fn read_record(dir: &Utf8Path) -> Result<ModRecord, SError> {
    let (manifest, enabled) = match ModFS::locate_manifest(dir) {
        ManifestState::Enabled(path) => (path, true),
        ManifestState::Disabled(path) => (path, false),
        ManifestState::Missing => {
            return Err(SError::ManifestMissing {
                path: dir.to_owned(),
            })
        }
    };

    let descriptor = ModFS::read_manifest(&manifest)?;
    Ok(ModRecord::new(descriptor, dir.to_owned(), enabled))
}
