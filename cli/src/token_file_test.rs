use super::*;

fn scratch_path() -> PathBuf {
    std::env::temp_dir().join(format!("studio-token-{}", uuid::Uuid::new_v4()))
}

#[test]
fn missing_file_loads_nothing() {
    let store = FileTokenStore::new(scratch_path());
    assert_eq!(store.load(), None);
}

#[test]
fn save_then_load_returns_token() {
    let path = scratch_path();
    let mut store = FileTokenStore::new(&path);
    store.save("tok-123");
    assert_eq!(store.load().as_deref(), Some("tok-123"));
    assert_eq!(FileTokenStore::new(&path).load().as_deref(), Some("tok-123"));
    store.clear();
}

#[test]
fn clear_removes_the_file() {
    let path = scratch_path();
    let mut store = FileTokenStore::new(&path);
    store.save("tok-123");
    store.clear();
    assert!(!path.exists());
    assert_eq!(store.load(), None);
}

#[test]
fn clear_without_file_is_a_no_op() {
    let mut store = FileTokenStore::new(scratch_path());
    store.clear();
    assert_eq!(store.load(), None);
}

#[test]
fn blank_file_counts_as_no_token() {
    let path = scratch_path();
    std::fs::write(&path, "  \n").unwrap();
    let mut store = FileTokenStore::new(&path);
    assert_eq!(store.load(), None);
    store.clear();
}

#[cfg(unix)]
fn mode_of(path: &std::path::Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}

#[cfg(unix)]
#[test]
fn saved_token_is_owner_only() {
    let path = scratch_path();
    let mut store = FileTokenStore::new(&path);
    store.save("tok-123");
    assert_eq!(mode_of(&path), 0o600);
    store.clear();
}

#[cfg(unix)]
#[test]
fn saving_over_open_file_tightens_mode() {
    use std::os::unix::fs::PermissionsExt;

    let path = scratch_path();
    std::fs::write(&path, "old\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let mut store = FileTokenStore::new(&path);
    store.save("tok-456");
    assert_eq!(mode_of(&path), 0o600);
    assert_eq!(store.load().as_deref(), Some("tok-456"));
    store.clear();
}
