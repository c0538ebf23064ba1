use crate::core::mod_fs::ModFS;
use crate::models::error::{IoContext, SError};
use crate::models::mod_dto::ModDescriptor;
use crate::models::paths::MANIFEST_FILE;
use crate::utils::file::FileUtils;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use std::fs;
use std::io::{Read, Seek};
use tracing::{debug, warn};
use zip::ZipArchive;

/// An archive entry that passed validation, with its path relative to the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub index: usize,
    pub relative: Utf8PathBuf,
    pub is_dir: bool,
}

impl PlannedEntry {
    /// First component of the entry below the storage root.
    pub fn top_level(&self) -> &str {
        self.relative.iter().next().unwrap_or_default()
    }
}

/// The `<folder>/info.json` entry that makes an archive a mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveManifest {
    pub index: usize,
    pub folder: String,
}

pub struct Decompression;

impl Decompression {
    pub fn open<R: Read + Seek>(source: R) -> Result<ZipArchive<R>, SError> {
        ZipArchive::new(source).map_err(|source| SError::InvalidArchive { source })
    }

    /// Finds the first entry that is exactly one folder deep and named `info.json`
    /// (any case, either separator).
    pub fn find_manifest<R: Read + Seek>(
        archive: &ZipArchive<R>,
    ) -> Result<ArchiveManifest, SError> {
        (0..archive.len())
            .find_map(|index| {
                let name = archive.name_for_index(index)?;
                Self::manifest_folder(name).map(|folder| ArchiveManifest {
                    index,
                    folder: folder.to_string(),
                })
            })
            .ok_or(SError::ArchiveWithoutManifest)
    }

    /// Reads and parses the manifest entry without extracting anything.
    pub fn read_manifest<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        manifest: &ArchiveManifest,
    ) -> Result<ModDescriptor, SError> {
        let mut entry = archive.by_index(manifest.index)?;
        let label = Utf8PathBuf::from(entry.name());

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).at(&label)?;
        let text = String::from_utf8(bytes).map_err(|_| SError::ManifestInvalid {
            path: label.clone(),
            reason: "not UTF-8 text".to_string(),
        })?;

        ModFS::parse_manifest(&text, &label)
    }

    /// Validates every entry before anything is written.
    ///
    /// Fails on the first entry that would land outside `destination`, that
    /// would overwrite an existing file, that duplicates another entry, or that
    /// writes into a folder already present under `destination`.
    /// The manifest entry is planned as exactly `<folder>/info.json`.
    pub fn plan<R: Read + Seek>(
        archive: &ZipArchive<R>,
        manifest: &ArchiveManifest,
        destination: &Utf8Path,
    ) -> Result<Vec<PlannedEntry>, SError> {
        let mut planned = Vec::with_capacity(archive.len());
        let mut seen = HashSet::new();

        for index in 0..archive.len() {
            let name = archive.name_for_index(index).unwrap_or_default();

            let relative = if index == manifest.index {
                Utf8Path::new(&manifest.folder).join(MANIFEST_FILE)
            } else {
                match Self::entry_path(name)? {
                    Some(relative) => relative,
                    None => continue,
                }
            };
            // The manifest folder name is taken verbatim, so it goes through the same check
            Self::entry_path(relative.as_str())?;

            let is_dir = name.ends_with('/') || name.ends_with('\\');
            let output_path = destination.join(&relative);

            // Sibling folders get the same vacancy rule as the mod folder itself
            if is_dir || relative.iter().count() > 1 {
                let top = relative.iter().next().unwrap_or_default();
                let top_path = destination.join(top);
                match top_path.symlink_metadata() {
                    Ok(meta) if meta.is_dir() => {
                        return Err(SError::AlreadyInstalled {
                            folder: top.to_string(),
                        })
                    }
                    Ok(_) => return Err(SError::OccupiedByFile { path: top_path }),
                    Err(_) => {}
                }
            }

            if !is_dir {
                if output_path.symlink_metadata().is_ok() {
                    return Err(SError::FileExists { path: output_path });
                }
                if !seen.insert(relative.clone()) {
                    return Err(SError::FileExists { path: output_path });
                }
            } else if output_path.is_file() {
                return Err(SError::OccupiedByFile { path: output_path });
            }

            planned.push(PlannedEntry {
                index,
                relative,
                is_dir,
            });
        }

        Ok(planned)
    }

    /// Writes the planned entries below `destination`.
    pub fn extract<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        planned: &[PlannedEntry],
        destination: &Utf8Path,
    ) -> Result<(), SError> {
        fs::create_dir_all(destination).at(destination)?;

        for entry in planned {
            let mut file = archive.by_index(entry.index)?;
            let output_path = destination.join(&entry.relative);
            debug!("Extracting {}", entry.relative);

            // 1. Handle Directories
            if entry.is_dir {
                fs::create_dir_all(&output_path).at(&output_path)?;
                continue;
            }

            // 2. Handle Files, ensuring the parent directory exists
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).at(parent)?;
            }
            FileUtils::write_new(&output_path, &mut file)?;

            // 3. Preserve permissions on Unix, executables inside mods rely on it
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = file.unix_mode() {
                    let perms = fs::Permissions::from_mode(mode & 0o777);
                    if let Err(e) = fs::set_permissions(&output_path, perms) {
                        warn!("Unable to set permissions on {output_path}: {e}");
                    }
                }
            }
        }

        Ok(())
    }

    /// Paths directly under `destination` that extracting `planned` creates.
    pub fn created_paths(planned: &[PlannedEntry], destination: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut tops: Vec<&str> = planned.iter().map(PlannedEntry::top_level).collect();
        tops.sort_unstable();
        tops.dedup();
        tops.into_iter().map(|top| destination.join(top)).collect()
    }

    /// Resolves an archive entry name to a path relative to the extraction root.
    ///
    /// Both separators are accepted. `.` and `..` are resolved lexically; an entry
    /// that climbs above the root, is absolute, or carries a drive or stream
    /// specifier is rejected. `Ok(None)` means the entry names the root itself.
    pub fn entry_path(name: &str) -> Result<Option<Utf8PathBuf>, SError> {
        let traversal = || SError::PathTraversal {
            entry: name.to_string(),
        };

        if name.contains('\0') || name.starts_with('/') || name.starts_with('\\') {
            return Err(traversal());
        }

        let mut parts: Vec<&str> = Vec::new();
        for part in name.split(['/', '\\']) {
            match part {
                "" | "." => {}
                ".." => {
                    parts.pop().ok_or_else(traversal)?;
                }
                part if part.contains(':') => return Err(traversal()),
                part => parts.push(part),
            }
        }

        if parts.is_empty() {
            return Ok(None);
        }
        Ok(Some(parts.iter().collect()))
    }

    // Mirrors `^[^\\/]+[\\/]info\.json$`, case-insensitive.
    fn manifest_folder(name: &str) -> Option<&str> {
        let (folder, file) = name.split_once(['/', '\\'])?;
        (!folder.is_empty() && file.eq_ignore_ascii_case(MANIFEST_FILE)).then_some(folder)
    }
}
