//! Local path resolution and object key derivation
//!
//! Object keys use `/` as the hierarchy separator. Downloads map a key onto a
//! local directory while preserving the key's internal structure; uploads map
//! a local path relative to the source directory onto the key namespace.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Compute the local destination path for an object key
///
/// Joins `local_dir` with the key's path segments. Leading slashes, empty
/// segments, and `.` segments are dropped. Keys containing `..` segments are
/// rejected so a key can never escape the target directory. Purely lexical;
/// does not touch the filesystem.
pub fn destination_path(local_dir: &Path, key: &str) -> Result<PathBuf> {
    let mut dest = local_dir.to_path_buf();
    let mut has_segment = false;

    for segment in key.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(Error::InvalidKey(format!(
                    "key '{key}' contains a parent directory segment"
                )));
            }
            _ => {
                dest.push(segment);
                has_segment = true;
            }
        }
    }

    if !has_segment {
        return Err(Error::InvalidKey(format!("key '{key}' has no file name")));
    }

    Ok(dest)
}

/// Create any missing parent directories for a destination path
///
/// Succeeds when the directories already exist; fails when creation is blocked
/// by permissions or by a file occupying a directory slot.
pub fn ensure_parent_dirs(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::Filesystem(format!(
                "failed to create directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Resolve the local destination path for a downloaded object
///
/// Combines [`destination_path`] with [`ensure_parent_dirs`]: the returned
/// path's parent directories exist after the call.
pub fn resolve_local_path(local_dir: &Path, key: &str) -> Result<PathBuf> {
    let dest = destination_path(local_dir, key)?;
    ensure_parent_dirs(&dest)?;
    Ok(dest)
}

/// Derive the object key for an uploaded file
///
/// Pure function of the file's path relative to the upload root plus the
/// caller-supplied prefix. With `keep_dirs` the relative directory structure
/// is preserved in the key (local separators become `/`); without it only the
/// file name is used. The prefix is prepended verbatim.
pub fn object_key_for(relative: &Path, prefix: &str, keep_dirs: bool) -> String {
    let base = if keep_dirs {
        relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    } else {
        relative
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    format!("{prefix}{base}")
}

/// Recursively enumerate regular files under a directory
///
/// Returns paths in lexicographic order so a batch over the same tree is
/// deterministic and repeatable.
pub fn enumerate_files(dir: &Path) -> Result<Vec<PathBuf>> {
    fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            } else if path.is_dir() {
                walk(&path, files)?;
            }
        }
        Ok(())
    }

    let mut files = Vec::new();
    walk(dir, &mut files).map_err(|e| {
        Error::Filesystem(format!("failed to read directory '{}': {e}", dir.display()))
    })?;
    files.sort();
    Ok(files)
}
