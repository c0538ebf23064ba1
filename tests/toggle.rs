mod common;

use common::{install_test_mod, setup_repo};
use cv_mods_lib::models::error::{ErrorKind, SError};
use std::fs;

#[test]
fn test_disable_then_enable_restores_mod() {
    let (_tmp, repo) = setup_repo();
    let dir = install_test_mod(&repo, "Alpha", "Alpha Mod", true);
    let original = repo.find("Alpha").unwrap();
    let mut record = original.clone();

    // 1. Disable
    repo.disable(&mut record).expect("disable failed");
    assert!(!record.is_enabled());
    assert!(!dir.join("info.json").exists());
    assert!(dir.join("info.json.DISABLED").is_file());
    assert!(!repo.find("Alpha").unwrap().is_enabled());

    // 2. Enable again
    repo.enable(&mut record).expect("enable failed");
    assert!(record.is_enabled());
    assert_eq!(record, original);
    assert_eq!(repo.find("Alpha").unwrap(), original);

    // 3. Other files are untouched
    assert!(dir.join("data/ships.json").is_file());
    assert!(dir.join("readme.txt").is_file());
}

#[test]
fn test_second_enable_is_a_state_conflict() {
    let (_tmp, repo) = setup_repo();
    install_test_mod(&repo, "Beta", "Beta Mod", false);
    let mut record = repo.find("Beta").unwrap();

    repo.enable(&mut record).unwrap();
    let err = repo.enable(&mut record).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::StateConflict);
    assert!(matches!(err, SError::AlreadyEnabled { .. }));
    assert!(record.is_enabled());
}

#[test]
fn test_second_disable_is_a_state_conflict() {
    let (_tmp, repo) = setup_repo();
    install_test_mod(&repo, "Beta", "Beta Mod", true);
    let mut record = repo.find("Beta").unwrap();

    repo.disable(&mut record).unwrap();
    let err = repo.disable(&mut record).unwrap_err();

    assert!(matches!(err, SError::AlreadyDisabled { .. }));
    assert!(!record.is_enabled());
}

#[test]
fn test_toggle_flips_both_ways() {
    let (_tmp, repo) = setup_repo();
    install_test_mod(&repo, "Gamma", "Gamma Mod", true);
    let mut record = repo.find("Gamma").unwrap();

    repo.toggle(&mut record).unwrap();
    assert!(!repo.find("Gamma").unwrap().is_enabled());

    repo.toggle(&mut record).unwrap();
    assert!(repo.find("Gamma").unwrap().is_enabled());
}

#[test]
fn test_toggle_refuses_inconsistent_directories() {
    let (_tmp, repo) = setup_repo();
    let dir = install_test_mod(&repo, "Twin", "Twin Mod", true);
    let mut record = repo.find("Twin").unwrap();

    // 1. Both manifests present: nothing is renamed, nothing is overwritten
    fs::write(dir.join("info.json.DISABLED"), "older copy").unwrap();
    let err = repo.disable(&mut record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StateConflict);
    assert!(record.is_enabled());
    assert_eq!(fs::read_to_string(dir.join("info.json.DISABLED")).unwrap(), "older copy");

    // 2. No manifest left at all
    fs::remove_file(dir.join("info.json")).unwrap();
    fs::remove_file(dir.join("info.json.DISABLED")).unwrap();
    let err = repo.enable(&mut record).unwrap_err();
    assert!(matches!(err, SError::InconsistentState { .. }));
    assert!(record.is_enabled());
}
