use std::time::Duration;

use lexguard::application::ports::DocumentStaging;
use lexguard::infrastructure::storage::TempStore;

#[tokio::test]
async fn given_staged_bytes_when_guard_drops_then_file_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let store = TempStore::new(dir.path().to_path_buf()).unwrap();

    let staged = store.stage(b"agreement body", "txt").await.unwrap();
    let path = staged.path().to_path_buf();
    assert!(path.exists());
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("txt"));

    drop(staged);
    assert!(!path.exists());
}

#[tokio::test]
async fn given_file_already_removed_when_guard_drops_then_nothing_panics() {
    let dir = tempfile::tempdir().unwrap();
    let store = TempStore::new(dir.path().to_path_buf()).unwrap();

    let staged = store.stage(b"agreement body", "pdf").await.unwrap();
    std::fs::remove_file(staged.path()).unwrap();

    // Mirrors the sweep racing a finishing request.
    drop(staged);
}

#[tokio::test]
async fn given_concurrent_stages_when_writing_then_filenames_never_collide() {
    let dir = tempfile::tempdir().unwrap();
    let store = TempStore::new(dir.path().to_path_buf()).unwrap();

    let a = store.stage(b"one", "txt").await.unwrap();
    let b = store.stage(b"two", "txt").await.unwrap();

    assert_ne!(a.path(), b.path());
}

#[tokio::test]
async fn given_stale_files_when_sweeping_then_only_expired_files_are_removed() {
    let dir = tempfile::tempdir().unwrap();
    let store = TempStore::new(dir.path().to_path_buf()).unwrap();

    let staged = store.stage(b"left behind by a crash", "docx").await.unwrap();
    let path = staged.path().to_path_buf();
    std::mem::forget(staged);

    // Everything is younger than an hour, so nothing goes.
    let removed = store.sweep(Duration::from_secs(3600)).await.unwrap();
    assert_eq!(removed, 0);
    assert!(path.exists());

    // With a zero max-age every file has expired.
    let removed = store.sweep(Duration::ZERO).await.unwrap();
    assert_eq!(removed, 1);
    assert!(!path.exists());
}

#[tokio::test]
async fn given_empty_dir_when_sweeping_then_sweep_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let store = TempStore::new(dir.path().to_path_buf()).unwrap();

    let removed = store.sweep(Duration::ZERO).await.unwrap();
    assert_eq!(removed, 0);
}
