use crate::core::installer::Installer;
use crate::core::packager::Packager;
use crate::core::scanner::{self, ScanReport};
use crate::core::mod_manager;
use crate::models::error::{IoContext, SError};
use crate::models::mod_dto::ModRecord;
use crate::utils::progress::ProgressSink;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::{Read, Seek, Write};

/// The mods folder of one game installation and every operation on it.
///
/// All state lives on disk; records returned by [`ModRepository::scan`] are
/// snapshots and go stale as soon as anything else touches the folder.
#[derive(Clone, Debug)]
pub struct ModRepository {
    root: Utf8PathBuf,
}

impl ModRepository {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Builds a repository from the platform lookup that knows where the game keeps its mods.
    pub fn from_resolver<F>(resolve: F) -> Result<Self, SError>
    where
        F: FnOnce() -> Result<Utf8PathBuf, SError>,
    {
        resolve().map(Self::new)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn has_root(&self) -> bool {
        self.root.is_dir()
    }

    /// Creates the mods folder if the game has not done so yet.
    pub fn ensure_root(&self) -> Result<&Utf8Path, SError> {
        std::fs::create_dir_all(&self.root).at(&self.root)?;
        Ok(&self.root)
    }

    pub fn scan(&self) -> Result<Vec<ModRecord>, SError> {
        Ok(self.scan_report()?.mods)
    }

    /// Like [`ModRepository::scan`], but also reports the folders that were skipped and why.
    pub fn scan_report(&self) -> Result<ScanReport, SError> {
        scanner::scan(&self.root)
    }

    /// Looks a mod up by its folder name.
    pub fn find(&self, folder: &str) -> Result<ModRecord, SError> {
        self.scan()?
            .into_iter()
            .find(|m| m.folder_name() == folder)
            .ok_or_else(|| SError::NotFound {
                path: self.root.join(folder),
            })
    }

    pub fn enable(&self, record: &mut ModRecord) -> Result<(), SError> {
        mod_manager::enable(record)
    }

    pub fn disable(&self, record: &mut ModRecord) -> Result<(), SError> {
        mod_manager::disable(record)
    }

    pub fn toggle(&self, record: &mut ModRecord) -> Result<(), SError> {
        mod_manager::toggle(record)
    }

    pub fn pack<W: Write + Seek>(
        &self,
        record: &ModRecord,
        target: W,
        progress: &mut dyn ProgressSink,
    ) -> Result<W, SError> {
        Packager::pack(record, target, progress)
    }

    pub fn pack_to_file(
        &self,
        record: &ModRecord,
        out_dir: &Utf8Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<Utf8PathBuf, SError> {
        Packager::pack_to_file(record, out_dir, progress)
    }

    pub fn install(
        &self,
        input: &Utf8Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<ModRecord, SError> {
        Installer::install(&self.root, input, progress)
    }

    pub fn install_from_archive<R: Read + Seek>(&self, source: R) -> Result<ModRecord, SError> {
        Installer::install_from_archive(&self.root, source)
    }

    pub fn install_from_archive_file(&self, archive: &Utf8Path) -> Result<ModRecord, SError> {
        Installer::install_from_archive_file(&self.root, archive)
    }

    pub fn install_from_directory(
        &self,
        source: &Utf8Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<ModRecord, SError> {
        Installer::install_from_directory(&self.root, source, progress)
    }

    pub fn uninstall(&self, record: &ModRecord) -> Result<(), SError> {
        mod_manager::uninstall(&self.root, record)
    }
}
