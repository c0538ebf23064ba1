#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cv_mods_lib::core::repository::ModRepository;
use cv_mods_lib::models::mod_dto::ModRecord;
use std::fs;
use std::io::{Cursor, Write};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Temp workspace with an existing, empty `mods` folder.
pub fn setup_repo() -> (TempDir, ModRepository) {
    let tmp = tempfile::tempdir().unwrap();
    let base = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
    let root = base.join("mods");
    fs::create_dir_all(&root).unwrap();
    (tmp, ModRepository::new(root))
}

pub fn tmp_path(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap()
}

pub fn manifest_json(title: &str) -> String {
    format!(
        r#"{{"title": "{title}", "description": "About {title}", "publishedFileId": 123456789, "tags": ["Ships", "QoL"]}}"#
    )
}

/// Mock a mod folder: a manifest in the requested state plus two data files.
pub fn create_test_mod(dir: &Utf8Path, title: &str, enabled: bool) -> Utf8PathBuf {
    fs::create_dir_all(dir.join("data")).unwrap();
    let manifest = if enabled { "info.json" } else { "info.json.DISABLED" };
    fs::write(dir.join(manifest), manifest_json(title)).unwrap();
    fs::write(dir.join("data/ships.json"), format!("{{\"owner\": \"{title}\"}}")).unwrap();
    fs::write(dir.join("readme.txt"), "read me").unwrap();
    dir.to_owned()
}

pub fn install_test_mod(repo: &ModRepository, folder: &str, title: &str, enabled: bool) -> Utf8PathBuf {
    create_test_mod(&repo.root().join(folder), title, enabled)
}

/// Builds a zip in memory. Names ending in a separator become directory entries.
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    build_zip_with(entries, SimpleFileOptions::default())
}

/// Like [`build_zip`], but file data is stored uncompressed and can be found in the bytes.
pub fn build_stored_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    build_zip_with(
        entries,
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
    )
}

fn build_zip_with(entries: &[(&str, &str)], options: SimpleFileOptions) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

pub fn sorted_scan(repo: &ModRepository) -> Vec<ModRecord> {
    let mut mods = repo.scan().unwrap();
    mods.sort_by(|a, b| a.folder_name().cmp(b.folder_name()));
    mods
}

pub fn dir_is_empty(dir: &Utf8Path) -> bool {
    fs::read_dir(dir).unwrap().next().is_none()
}
