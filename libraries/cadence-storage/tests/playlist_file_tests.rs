//! Integration tests for the JSON playlist file
//!
//! Exercises real files in temporary directories: first run, corruption,
//! overwrite semantics, and order preservation.

use cadence_core::{SessionStore, Track};
use cadence_storage::PlaylistFile;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn tracks(paths: &[&str]) -> Vec<Track> {
    paths.iter().map(|p| Track::new(*p)).collect()
}

#[test]
fn missing_file_loads_empty() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let store = PlaylistFile::new(dir.path().join("playlist.json"));

    assert!(store.load().is_empty());
}

#[test]
fn truncated_json_loads_empty() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.json");
    fs::write(&path, r#"["/music/a.mp3", "/music/b"#).unwrap();

    let store = PlaylistFile::new(&path);
    assert!(store.load().is_empty());
    assert!(store.try_load().is_err());
}

#[test]
fn wrong_json_shape_loads_empty() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.json");

    for contents in [r#"{"tracks": []}"#, "[1, 2, 3]", r#""/music/a.mp3""#, ""] {
        fs::write(&path, contents).unwrap();
        assert!(
            PlaylistFile::new(&path).load().is_empty(),
            "expected empty playlist for {:?}",
            contents
        );
    }
}

#[test]
fn reads_files_written_by_other_tools() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.json");
    // Pretty-printed with spaces, as other JSON writers produce
    fs::write(&path, "[\"/music/a.mp3\", \"relative/b.ogg\"]\n").unwrap();

    let store = PlaylistFile::new(&path);
    assert_eq!(store.load(), tracks(&["/music/a.mp3", "relative/b.ogg"]));
}

#[test]
fn save_writes_json_array_of_strings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.json");
    let store = PlaylistFile::new(&path);

    store.save(&tracks(&["/music/a.mp3", "/music/b.flac"])).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, vec!["/music/a.mp3", "/music/b.flac"]);
}

#[test]
fn save_replaces_previous_contents() {
    let dir = TempDir::new().unwrap();
    let store = PlaylistFile::new(dir.path().join("playlist.json"));

    store.save(&tracks(&["a", "b", "c"])).unwrap();
    store.save(&tracks(&["c"])).unwrap();

    assert_eq!(store.load(), tracks(&["c"]));
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = PlaylistFile::new(dir.path().join("nested/config/playlist.json"));

    store.save(&tracks(&["a"])).unwrap();

    assert_eq!(store.load(), tracks(&["a"]));
}

#[test]
fn save_leaves_no_temporary_files_behind() {
    let dir = TempDir::new().unwrap();
    let store = PlaylistFile::new(dir.path().join("playlist.json"));

    store.save(&tracks(&["a"])).unwrap();
    store.save(&tracks(&["a", "b"])).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn save_to_unwritable_location_fails() {
    let dir = TempDir::new().unwrap();
    // The target path is an existing directory, so the rename cannot succeed
    let target = dir.path().join("occupied");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep"), "x").unwrap();

    let store = PlaylistFile::new(&target);
    assert!(store.save(&tracks(&["a"])).is_err());
}

#[test]
fn save_of_loaded_list_is_a_fixed_point() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("playlist.json");
    let store = PlaylistFile::new(&path);

    store
        .save(&tracks(&["/music/z.mp3", "/music/a.mp3", "/music/ünïcode ♪.flac"]))
        .unwrap();
    let before = fs::read(&path).unwrap();

    let loaded = store.load();
    store.save(&loaded).unwrap();
    let after = fs::read(&path).unwrap();

    assert_eq!(before, after);
}

proptest! {
    /// Property: any list of paths survives a save/load cycle in order
    #[test]
    fn save_then_load_preserves_order(paths in prop::collection::vec(".{0,40}", 0..30)) {
        let dir = TempDir::new().unwrap();
        let store = PlaylistFile::new(dir.path().join("playlist.json"));
        let list: Vec<Track> = paths.into_iter().map(Track::new).collect();

        store.save(&list).unwrap();

        prop_assert_eq!(store.load(), list);
    }
}
