mod common;

use common::{install_test_mod, setup_repo, sorted_scan};
use cv_mods_lib::core::repository::ModRepository;
use cv_mods_lib::models::error::{ErrorKind, SError};
use std::fs;

#[test]
fn test_missing_root_scans_empty() {
    let (tmp, _) = setup_repo();
    let repo = ModRepository::new(common::tmp_path(&tmp).join("does/not/exist"));

    assert!(!repo.has_root());
    let report = repo.scan_report().expect("a missing root is not an error");
    assert!(report.mods.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn test_enabled_state_follows_manifest_name() {
    let (_tmp, repo) = setup_repo();
    install_test_mod(&repo, "Alpha", "Alpha Mod", true);
    install_test_mod(&repo, "Beta", "Beta Mod", false);

    let mods = sorted_scan(&repo);

    assert_eq!(mods.len(), 2);
    assert_eq!(mods[0].folder_name(), "Alpha");
    assert!(mods[0].is_enabled());
    assert_eq!(mods[1].folder_name(), "Beta");
    assert!(!mods[1].is_enabled());

    // Descriptor is read from whichever manifest exists
    let beta = mods[1].descriptor();
    assert_eq!(beta.title(), "Beta Mod");
    assert_eq!(beta.description(), "About Beta Mod");
    assert_eq!(beta.published_file_id(), Some(123456789));
    assert_eq!(beta.tags(), ["Ships".to_string(), "QoL".to_string()]);
    assert_eq!(mods[1].directory(), repo.root().join("Beta").as_path());
}

#[test]
fn test_non_mod_folders_and_bad_manifests_are_skipped() {
    let (_tmp, repo) = setup_repo();
    install_test_mod(&repo, "Good", "Good Mod", true);

    // 1. Folder without any manifest
    fs::create_dir_all(repo.root().join("Screenshots")).unwrap();

    // 2. Folder with a broken manifest
    let broken = repo.root().join("Broken");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("info.json.DISABLED"), "{ not json").unwrap();

    // 3. Loose file in the root is ignored silently
    fs::write(repo.root().join("notes.txt"), "hello").unwrap();

    let report = repo.scan_report().unwrap();

    assert_eq!(report.mods.len(), 1);
    assert_eq!(report.mods[0].folder_name(), "Good");

    assert_eq!(report.skipped.len(), 2);
    let missing = report
        .skipped
        .iter()
        .find(|s| s.directory.ends_with("Screenshots"))
        .expect("Screenshots should be reported");
    assert!(matches!(missing.error, SError::ManifestMissing { .. }));

    let broken = report
        .skipped
        .iter()
        .find(|s| s.directory.ends_with("Broken"))
        .expect("Broken should be reported");
    assert_eq!(broken.error.kind(), ErrorKind::InvalidManifest);
    assert!(broken.error.to_string().contains("info.json.DISABLED"));
}

#[test]
fn test_enabled_manifest_wins_when_both_exist() {
    let (_tmp, repo) = setup_repo();
    let dir = install_test_mod(&repo, "Twin", "Enabled Title", true);
    fs::write(
        dir.join("info.json.DISABLED"),
        common::manifest_json("Disabled Title"),
    )
    .unwrap();

    let mods = repo.scan().unwrap();

    assert_eq!(mods.len(), 1);
    assert!(mods[0].is_enabled());
    assert_eq!(mods[0].title(), "Enabled Title");
}

#[test]
fn test_manifest_name_is_case_sensitive_for_discovery() {
    let (_tmp, repo) = setup_repo();
    let dir = repo.root().join("Shouty");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("info.json.disabled"), common::manifest_json("Shouty")).unwrap();

    if dir.join("info.json.DISABLED").exists() {
        // Case-insensitive filesystem, the lookup legitimately succeeds
        return;
    }

    let report = repo.scan_report().unwrap();
    assert!(report.mods.is_empty());
    assert_eq!(report.skipped.len(), 1);
}

#[test]
fn test_find_by_folder_name() {
    let (_tmp, repo) = setup_repo();
    install_test_mod(&repo, "Alpha", "Alpha Mod", true);

    assert_eq!(repo.find("Alpha").unwrap().title(), "Alpha Mod");
    assert_eq!(repo.find("Gamma").unwrap_err().kind(), ErrorKind::NotFound);
}
