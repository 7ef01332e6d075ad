//! Output locations for files written by tests.

use std::path::{Path, PathBuf};

/// `<workspace>/test_output`, next to the member crates.
pub fn test_output_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("test_output")
}

/// Path for a test artifact, e.g. `"io/roundtrip.png"`.
///
/// Missing parent directories are created and a leftover file from an earlier
/// run is removed, so a test never reads a stale artifact.
pub fn test_output_path(name: &str) -> PathBuf {
    let path = test_output_dir().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create {:?}: {}", parent, e));
    }
    if path.exists() {
        std::fs::remove_file(&path)
            .unwrap_or_else(|e| panic!("Failed to remove stale {:?}: {}", path, e));
    }
    path
}
