// src/core/test_support.rs

//! Filesystem fixtures shared by the unit tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates `entries` under a fresh `.clide` directory and returns the temp dir
/// (keep it alive) plus the marker path. Entries ending in `/` are directories,
/// everything else an empty shell script.
pub(crate) fn fixture(entries: &[&str]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join(".clide");
    fs::create_dir_all(&root).unwrap();
    for entry in entries {
        let path = root.join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            fs::create_dir_all(&path).unwrap();
        } else {
            write_script(&path, "");
        }
    }
    (dir, root)
}

/// Writes an executable `/bin/sh` script with `body`, creating parent directories.
pub(crate) fn write_script(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
