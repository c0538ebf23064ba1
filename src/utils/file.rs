use crate::core::mod_fs::ModFS;
use crate::models::error::{IoContext, SError};
use crate::utils::progress::ProgressSink;
use camino::Utf8Path;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};

pub struct FileUtils;

impl FileUtils {
    /// Recursively copies every file of `src` into `dst`, preserving relative paths.
    /// Refuses to overwrite anything that already exists at the destination.
    pub fn copy_recursive(
        src: &Utf8Path,
        dst: &Utf8Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<usize, SError> {
        // 1. Snapshot the file list first so a destination inside `src` is never walked
        let files = ModFS::collect_files(src)?;

        // 2. Ensure the root destination directory exists
        fs::create_dir_all(dst).at(dst)?;

        for rel_path in &files {
            let src_path = src.join(rel_path);
            let dst_path = dst.join(rel_path);

            progress.line(&format!("Copying {rel_path}..."));

            // 3. Create intermediate directories as needed
            if let Some(parent) = dst_path.parent() {
                fs::create_dir_all(parent).at(parent)?;
            }

            // 4. Copy without clobbering
            let mut reader = File::open(&src_path).at(&src_path)?;
            Self::write_new(&dst_path, &mut reader)?;
        }

        Ok(files.len())
    }

    /// Creates `path` and fills it from `reader`. Fails if `path` already exists.
    pub fn write_new(path: &Utf8Path, reader: &mut dyn Read) -> Result<u64, SError> {
        let mut out = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => SError::FileExists {
                    path: path.to_owned(),
                },
                _ => SError::io(path, e),
            })?;
        io::copy(reader, &mut out).at(path)
    }
}
