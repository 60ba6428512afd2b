//! QA tests for consent persistence on disk.
//!
//! These tests verify that a decision survives a restart, that a damaged
//! file never blocks the site and that origins do not share state.
//! Run with: `cargo test -p site-core --test qa_persistence`

use std::fs;

use site_core::consent::CONSENT_STORAGE_KEY;
use site_core::headless::{HeadlessConfig, HeadlessSite};
use site_core::{
    Action, ConsentDecision, ConsentState, FileStorage, KeyValueStore, MemoryHistory, Route,
    Shell, SiteConfig, StaticContent, Transition,
};
use tempfile::TempDir;

fn open_site(dir: &TempDir, origin: &str) -> HeadlessSite {
    HeadlessSite::new(HeadlessConfig::with_storage(dir.path(), origin)).expect("valid config")
}

// =============================================================================
// TEST 1: Decision survives a restart
// =============================================================================

#[test]
fn test_decision_survives_restart() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut site = open_site(&temp_dir, "arc-assessment");
    assert!(site.banner_visible());
    site.execute_line("settings");
    site.execute_line("toggle marketing on");
    let reply = site.execute_line("save");
    assert_eq!(reply.transition, Some(Transition::Applied));
    drop(site);

    let site = open_site(&temp_dir, "arc-assessment");
    assert!(!site.banner_visible());
    assert_eq!(site.decision(), Some(ConsentDecision::new(false, true, false)));
}

#[test]
fn test_file_layout() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut site = open_site(&temp_dir, "arc-assessment");
    site.execute_line("accept-necessary");

    let path = temp_dir
        .path()
        .join("arc-assessment")
        .join("cookie-consent.json");
    let raw = fs::read_to_string(&path).expect("consent file written");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid JSON");
    assert_eq!(value["version"], "1.0");
    assert_eq!(value["consent"]["necessary"], true);
    assert_eq!(value["consent"]["analytics"], false);
}

// =============================================================================
// TEST 2: Damaged files
// =============================================================================

#[test]
fn test_corrupted_file_falls_back_to_banner() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = FileStorage::open(temp_dir.path(), "arc-assessment");
    fs::create_dir_all(storage.dir()).expect("create origin dir");
    fs::write(storage.path_for(CONSENT_STORAGE_KEY), "{\"version\":\"1.0\",\"cons")
        .expect("write garbage");

    let mut site = open_site(&temp_dir, "arc-assessment");
    assert!(site.banner_visible());
    assert_eq!(site.shell().consent().state(), ConsentState::Undecided);

    // Deciding replaces the damaged value.
    site.execute_line("accept-all");
    drop(site);
    let site = open_site(&temp_dir, "arc-assessment");
    assert_eq!(site.decision(), Some(ConsentDecision::all()));
}

#[test]
fn test_overwrite_leaves_no_staging_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut site = open_site(&temp_dir, "arc-assessment");
    for line in ["accept-all", "accept-necessary", "accept-all"] {
        site.execute_line(line);
    }

    let entries: Vec<_> = fs::read_dir(temp_dir.path().join("arc-assessment"))
        .expect("origin dir exists")
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, ["cookie-consent.json"]);
}

#[cfg(unix)]
#[test]
fn test_unwritable_directory_is_not_persisted() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let origin_dir = temp_dir.path().join("arc-assessment");
    fs::create_dir_all(&origin_dir).expect("create origin dir");
    fs::set_permissions(&origin_dir, fs::Permissions::from_mode(0o500)).expect("chmod");

    // Root ignores permission bits; nothing to observe then.
    let probe = origin_dir.join("probe");
    if fs::write(&probe, "x").is_ok() {
        let _ = fs::remove_file(&probe);
        return;
    }

    let mut site = open_site(&temp_dir, "arc-assessment");
    let reply = site.execute_line("accept-all");
    assert_eq!(reply.transition, Some(Transition::NotPersisted));
    assert!(reply.has_tag("ERROR"));
    assert!(site.banner_visible());
    assert_eq!(site.decision(), None);

    fs::set_permissions(&origin_dir, fs::Permissions::from_mode(0o700)).expect("chmod back");
}

// =============================================================================
// TEST 3: Origin scoping
// =============================================================================

#[test]
fn test_origins_do_not_share_consent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut production = open_site(&temp_dir, "arc-assessment");
    production.execute_line("accept-all");

    let staging = open_site(&temp_dir, "staging");
    assert!(staging.banner_visible());
    assert_eq!(staging.decision(), None);
}

#[test]
fn test_external_clearing_asks_again() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = SiteConfig::new().with_storage_dir(temp_dir.path());

    let mut shell = config.build_shell().expect("valid config");
    shell.dispatch(Action::AcceptAll);
    drop(shell);

    let mut storage = FileStorage::open(temp_dir.path(), &config.origin);
    storage.remove(CONSENT_STORAGE_KEY).expect("remove");
    storage.remove(CONSENT_STORAGE_KEY).expect("remove twice");

    let shell = Shell::new(storage, MemoryHistory::new("/Cookies"), StaticContent);
    assert!(shell.view().banner_visible());
    assert_eq!(shell.route(), Route::CookiePolicy);
}
