use crate::core::mod_fs::ModFS;
use crate::models::error::{IoContext, SError};
use crate::models::mod_dto::ModRecord;
use crate::models::paths::{DISABLED_MANIFEST_FILE, MANIFEST_FILE};
use crate::utils::progress::ProgressSink;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use std::fs::File;
use std::io::{self, Seek, Write};
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const PACKER_NAME: &str = "cvmods";

/// One file of the mod and the name it gets inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    pub source: Utf8PathBuf,
    pub name: String,
}

pub struct Packager;

impl Packager {
    /// Writes the whole mod directory as a zip archive into `target`.
    ///
    /// Entries are named `<folder>/<relative path>` and the manifest is always
    /// stored as `<folder>/info.json`, whatever state the mod is in on disk.
    pub fn pack<W: Write + Seek>(
        record: &ModRecord,
        target: W,
        progress: &mut dyn ProgressSink,
    ) -> Result<W, SError> {
        let entries = Self::plan(record)?;
        Self::write(&entries, target, progress)
    }

    /// Packs into `<out_dir>/<folder>.zip`, replacing an older archive of the same name.
    pub fn pack_to_file(
        record: &ModRecord,
        out_dir: &Utf8Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<Utf8PathBuf, SError> {
        // 1. Snapshot the entries before the archive file itself exists
        let entries = Self::plan(record)?;

        // 2. Create the archive
        std::fs::create_dir_all(out_dir).at(out_dir)?;
        let archive_path = out_dir.join(format!("{}.zip", record.folder_name()));
        let file = File::create(&archive_path).at(&archive_path)?;

        // 3. Fill it
        Self::write(&entries, file, progress)?;
        info!("Mod packed into {archive_path}");
        Ok(archive_path)
    }

    /// Lists the archive entries for a mod without writing anything.
    pub fn plan(record: &ModRecord) -> Result<Vec<PackEntry>, SError> {
        let dir = record.directory();
        if !dir.is_dir() {
            return Err(SError::NotFound {
                path: dir.to_owned(),
            });
        }

        let folder = Utf8Path::new(record.folder_name());
        let files = ModFS::collect_files(dir)?;

        // Enabled name first, then the disabled one, then any other spelling.
        let manifest = files
            .iter()
            .filter(|f| Self::is_manifest_file(f))
            .min_by_key(|f| match f.as_str() {
                MANIFEST_FILE => 0,
                DISABLED_MANIFEST_FILE => 1,
                _ => 2,
            })
            .cloned()
            .ok_or_else(|| SError::ManifestMissing {
                path: dir.to_owned(),
            })?;

        let mut entries = Vec::with_capacity(files.len());
        for rel in files {
            let name = if rel == manifest {
                folder.join(MANIFEST_FILE)
            } else if Self::is_manifest_file(&rel) {
                warn!("Leaving out {rel} of {folder}, {manifest} is packed as the manifest");
                continue;
            } else {
                folder.join(&rel)
            };

            entries.push(PackEntry {
                source: dir.join(&rel),
                name: name.into_string(),
            });
        }

        Ok(entries)
    }

    fn write<W: Write + Seek>(
        entries: &[PackEntry],
        target: W,
        progress: &mut dyn ProgressSink,
    ) -> Result<W, SError> {
        let mut zip = ZipWriter::new(target);
        zip.set_comment(Self::comment());

        for entry in entries {
            let mut source = File::open(&entry.source).at(&entry.source)?;
            let size = source.metadata().at(&entry.source)?.len();
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .large_file(size >= u64::from(u32::MAX));

            progress.line(&entry.name);
            debug!("Packing: {}", entry.name);

            zip.start_file(entry.name.as_str(), options)?;
            io::copy(&mut source, &mut zip).at(&entry.source)?;
        }

        Ok(zip.finish()?)
    }

    fn comment() -> String {
        format!(
            "Created by {PACKER_NAME} on {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        )
    }

    // Only top-level files can be the manifest.
    fn is_manifest_file(rel: &Utf8Path) -> bool {
        let name = rel.as_str();
        name.eq_ignore_ascii_case(MANIFEST_FILE) || name.eq_ignore_ascii_case(DISABLED_MANIFEST_FILE)
    }
}
