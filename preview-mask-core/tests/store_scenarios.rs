//! Store behaviour against fixture plists: global and bundle-scoped writes,
//! preservation of unrelated fields, idempotence, and the bundle-miss path.

use std::fs;
use std::path::Path;

use assert_fs::prelude::*;
use plist::{Dictionary, Value};
use predicates::prelude::predicate;
use preview_mask_core::{
    BundleId, NotificationPreviewMode, PrefsError, PrefsStore, Target, WriteOutcome,
};

const KAKAO: &str = "com.kakao.KakaoTalkMac";
const OTHER: &str = "com.other.App";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app(bundle_id: &str, visibility: i64) -> Value {
    let mut d = Dictionary::new();
    d.insert("bundle-id".to_string(), Value::String(bundle_id.to_string()));
    d.insert("flags".to_string(), Value::Integer(41_951_246i64.into()));
    d.insert("grouping".to_string(), Value::Integer(0i64.into()));
    d.insert("content_visibility".to_string(), Value::Integer(visibility.into()));
    d.insert("path".to_string(), Value::String(format!("/Applications/{bundle_id}.app")));
    Value::Dictionary(d)
}

fn fixture_root() -> Dictionary {
    let mut root = Dictionary::new();
    root.insert("dnd_prefs".to_string(), Value::Data(vec![0x62, 0x70, 0x6c, 0x69]));
    root.insert("content_visibility".to_string(), Value::Integer(2i64.into()));
    root.insert(
        "apps".to_string(),
        Value::Array(vec![app(KAKAO, 3), app(OTHER, 2)]),
    );
    root.insert("ncprefs_version".to_string(), Value::Integer(7i64.into()));
    root
}

fn write_fixture(home: &assert_fs::TempDir) -> PrefsStore {
    let prefs = home.child("Library/Preferences/com.apple.ncprefs.plist");
    prefs.touch().expect("touch");
    Value::Dictionary(fixture_root())
        .to_file_binary(prefs.path())
        .expect("write fixture");
    PrefsStore::at_home(home.path())
}

fn read_root(path: &Path) -> Dictionary {
    Value::from_file(path)
        .expect("parse")
        .into_dictionary()
        .expect("root dict")
}

fn visibility(dict: &Dictionary) -> Option<i64> {
    dict.get("content_visibility").and_then(Value::as_signed_integer)
}

fn app_at(root: &Dictionary, index: usize) -> &Dictionary {
    root.get("apps")
        .and_then(Value::as_array)
        .and_then(|apps| apps.get(index))
        .and_then(Value::as_dictionary)
        .expect("app entry")
}

// ---------------------------------------------------------------------------
// 1. Global scope
// ---------------------------------------------------------------------------

#[test]
fn global_write_changes_top_level_and_leaves_apps_untouched() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let store = write_fixture(&home);

    store
        .write_mode(NotificationPreviewMode::Never, &Target::Global)
        .expect("write");

    let root = read_root(store.path());
    assert_eq!(visibility(&root), Some(1));
    assert_eq!(root.get("apps"), fixture_root().get("apps"));
    assert_eq!(root.get("dnd_prefs"), fixture_root().get("dnd_prefs"));
}

#[test]
fn written_file_is_binary_plist() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let store = write_fixture(&home);
    store
        .write_mode(NotificationPreviewMode::Always, &Target::Global)
        .expect("write");

    let bytes = fs::read(store.path()).expect("read");
    assert!(bytes.starts_with(b"bplist00"));
}

// ---------------------------------------------------------------------------
// 2. Bundle scope
// ---------------------------------------------------------------------------

#[test]
fn bundle_write_changes_only_first_matching_entry() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let store = write_fixture(&home);
    let target = Target::Bundle(BundleId::from(KAKAO));

    let before = store.read_mode(&target).expect("read");
    assert_eq!(before.mode, NotificationPreviewMode::Always);
    assert_eq!(before.bundle_index, Some(0));

    store
        .write_mode(NotificationPreviewMode::Never, &target)
        .expect("write");

    let root = read_root(store.path());
    let expected = fixture_root();
    assert_eq!(visibility(app_at(&root, 0)), Some(1));
    assert_eq!(app_at(&root, 0).get("flags"), app_at(&expected, 0).get("flags"));
    assert_eq!(app_at(&root, 1), app_at(&expected, 1));
    assert_eq!(visibility(&root), Some(2));
}

#[test]
fn every_other_value_and_key_order_survive_a_write() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let store = write_fixture(&home);
    store
        .write_mode(NotificationPreviewMode::Default, &Target::Bundle(BundleId::from(OTHER)))
        .expect("write");

    let mut expected = fixture_root();
    expected
        .get_mut("apps")
        .and_then(Value::as_array_mut)
        .and_then(|apps| apps.get_mut(1))
        .and_then(Value::as_dictionary_mut)
        .expect("second app")
        .insert("content_visibility".to_string(), Value::Integer(0i64.into()));

    let root = read_root(store.path());
    assert_eq!(root, expected);
    let keys: Vec<&String> = root.keys().collect();
    let expected_keys: Vec<&String> = expected.keys().collect();
    assert_eq!(keys, expected_keys);
}

// ---------------------------------------------------------------------------
// 3. Round-trip and idempotence
// ---------------------------------------------------------------------------

#[test]
fn writing_back_the_current_mode_is_byte_identical() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let store = write_fixture(&home);
    let original = fs::read(store.path()).expect("read");

    for target in [Target::Global, Target::Bundle(BundleId::from(KAKAO))] {
        let current = store.read_mode(&target).expect("read").mode;
        let outcome = store.write_mode(current, &target).expect("write");
        assert_eq!(outcome, WriteOutcome::Unchanged { mode: current });
    }

    assert_eq!(fs::read(store.path()).expect("read"), original);
}

#[test]
fn applying_the_same_mode_twice_equals_applying_once() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let store = write_fixture(&home);
    let target = Target::Bundle(BundleId::from(OTHER));

    let first = store
        .write_mode(NotificationPreviewMode::Always, &target)
        .expect("first write");
    assert!(matches!(first, WriteOutcome::Written { .. }));
    let once = fs::read(store.path()).expect("read");

    let second = store
        .write_mode(NotificationPreviewMode::Always, &target)
        .expect("second write");
    assert!(matches!(second, WriteOutcome::Unchanged { .. }));
    assert_eq!(fs::read(store.path()).expect("read"), once);
}

// ---------------------------------------------------------------------------
// 4. Failure paths
// ---------------------------------------------------------------------------

#[test]
fn missing_bundle_fails_and_leaves_file_untouched() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let store = write_fixture(&home);
    let original = fs::read(store.path()).expect("read");

    let err = store
        .write_mode(
            NotificationPreviewMode::Never,
            &Target::Bundle(BundleId::from("com.missing.App")),
        )
        .unwrap_err();
    assert!(matches!(err, PrefsError::BundleNotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("com.missing.App"));
    assert_eq!(fs::read(store.path()).expect("read"), original);
}

#[test]
fn corrupt_file_is_malformed_document() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let prefs = home.child("Library/Preferences/com.apple.ncprefs.plist");
    prefs.write_binary(b"bplist00 truncated").expect("write");

    let err = PrefsStore::at_home(home.path())
        .read_mode(&Target::Global)
        .unwrap_err();
    assert!(matches!(err, PrefsError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("com.apple.ncprefs.plist"));
    prefs.assert(predicate::path::exists());
}

#[test]
fn missing_file_is_access_error_and_nothing_is_created() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let err = PrefsStore::at_home(home.path())
        .write_mode(NotificationPreviewMode::Never, &Target::Global)
        .unwrap_err();
    assert!(matches!(err, PrefsError::Access { .. }), "got: {err}");
    home.child("Library/Preferences/com.apple.ncprefs.plist")
        .assert(predicate::path::missing());
}
