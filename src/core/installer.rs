use crate::core::decompression::Decompression;
use crate::core::mod_fs::ModFS;
use crate::core::scanner;
use crate::models::error::{IoContext, SError};
use crate::models::mod_dto::ModRecord;
use crate::models::paths::ManifestPaths;
use crate::utils::file::FileUtils;
use crate::utils::progress::ProgressSink;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, File};
use std::io::{Read, Seek};
use tracing::{debug, info, warn};

pub struct Installer;

impl Installer {
    /// Installs whatever `input` is: a file is treated as a zip archive, a
    /// directory as an unpacked mod.
    pub fn install(
        root: &Utf8Path,
        input: &Utf8Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<ModRecord, SError> {
        Self::process_as_archive(root, input)
            .or_else(|| Self::process_as_directory(root, input, progress))
            .unwrap_or_else(|| {
                Err(SError::NotFound {
                    path: input.to_owned(),
                })
            })
    }

    // --- Strategy Functions (Option<Result<...>>) ---

    fn process_as_archive(root: &Utf8Path, input: &Utf8Path) -> Option<Result<ModRecord, SError>> {
        input
            .is_file()
            .then(|| Self::install_from_archive_file(root, input))
    }

    fn process_as_directory(
        root: &Utf8Path,
        input: &Utf8Path,
        progress: &mut dyn ProgressSink,
    ) -> Option<Result<ModRecord, SError>> {
        input
            .is_dir()
            .then(|| Self::install_from_directory(root, input, progress))
    }

    pub fn install_from_archive_file(
        root: &Utf8Path,
        archive: &Utf8Path,
    ) -> Result<ModRecord, SError> {
        let file = File::open(archive).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SError::NotFound {
                path: archive.to_owned(),
            },
            _ => SError::io(archive, e),
        })?;
        Self::install_from_archive(root, file)
    }

    /// Extracts a packed mod into the storage root.
    ///
    /// Everything that can be checked up front is checked before the first
    /// byte is written: the manifest, the destination folder, and every entry
    /// path.
    pub fn install_from_archive<R: Read + Seek>(
        root: &Utf8Path,
        source: R,
    ) -> Result<ModRecord, SError> {
        // 1. Open the container
        let mut archive = Decompression::open(source)?;

        // 2. Locate `<folder>/info.json`
        let manifest = Decompression::find_manifest(&archive)?;
        let dest = root.join(&manifest.folder);
        debug!("archive manifest found for folder {}", manifest.folder);

        // 3. Refuse to clobber
        Self::ensure_vacant(&dest, &manifest.folder)?;

        // 4. The manifest must be readable before anything is installed
        let descriptor = Decompression::read_manifest(&mut archive, &manifest)?;

        // 5. Validate every entry, then extract
        let planned = Decompression::plan(&archive, &manifest, root)?;
        debug!("Extracting {} entries to {root}", planned.len());
        let created = Decompression::created_paths(&planned, root);
        if let Err(e) = Decompression::extract(&mut archive, &planned, root) {
            Self::rollback(&created);
            return Err(e);
        }

        info!("{} installed into {}", descriptor.title(), manifest.folder);
        Ok(ModRecord::new(descriptor, dest, true))
    }

    /// Copies an unpacked mod (a folder with `info.json` at its top) into the storage root.
    /// The new folder is named after the mod title.
    pub fn install_from_directory(
        root: &Utf8Path,
        source: &Utf8Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<ModRecord, SError> {
        // 1. Source must exist
        if !source.is_dir() {
            return Err(SError::NotFound {
                path: source.to_owned(),
            });
        }

        // 2. It must be an enabled mod
        let manifest = ManifestPaths::new(source).enabled;
        if !manifest.is_file() {
            return Err(SError::ManifestMissing {
                path: source.to_owned(),
            });
        }

        // 3. Parse it and derive the folder name from the title
        let descriptor = ModFS::read_manifest(&manifest)?;
        let folder = ModFS::sanitize_folder_name(descriptor.title());
        if folder.is_empty() || folder == "." || folder == ".." {
            return Err(SError::ManifestInvalid {
                path: manifest,
                reason: format!(
                    "title '{}' does not yield a usable folder name",
                    descriptor.title()
                ),
            });
        }

        // 4. Refuse to clobber
        let dest = root.join(&folder);
        Self::ensure_vacant(&dest, &folder)?;

        // 5. Copy
        let copied = match FileUtils::copy_recursive(source, &dest, progress) {
            Ok(copied) => copied,
            Err(e) => {
                Self::rollback(&[dest]);
                return Err(e);
            }
        };
        info!("{} installed into {folder} ({copied} files)", descriptor.title());

        scanner::read_record(&dest)
    }

    // Every path passed here was vacant before the install started.
    fn rollback(created: &[Utf8PathBuf]) {
        for path in created {
            let removed = match path.symlink_metadata() {
                Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
                Ok(_) => fs::remove_file(path),
                Err(_) => continue,
            };
            match removed {
                Ok(()) => warn!("Removed partially installed {path}"),
                Err(e) => warn!("Unable to remove partially installed {path}: {e}"),
            }
        }
    }

    fn ensure_vacant(dest: &Utf8Path, folder: &str) -> Result<(), SError> {
        let meta = match dest.symlink_metadata() {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e).at(dest),
        };

        if meta.is_dir() {
            Err(SError::AlreadyInstalled {
                folder: folder.to_string(),
            })
        } else {
            Err(SError::OccupiedByFile {
                path: dest.to_owned(),
            })
        }
    }
}
