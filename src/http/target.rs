//! Requested path resolution.
//!
//! The file is resolved and opened once per connection. The status line and
//! the body are both derived from the resulting [`FileTarget`], so they
//! always agree even if the file changes in between. Symbolic links are
//! followed only while they stay inside the document root.

use std::path::{Component, Path, PathBuf};
use tokio::fs::{self, File};

#[derive(Debug)]
pub enum FileTarget {
    /// An existing regular file, already open for reading.
    Regular { path: PathBuf, file: File },
    /// The path names a directory.
    Directory { path: PathBuf },
    /// Nothing servable: missing, unreadable, or outside the root.
    Missing,
}

impl FileTarget {
    /// Resolves `requested` (already stripped of its leading `/`) below `root`.
    pub async fn resolve(root: &Path, requested: &str) -> Self {
        if requested.is_empty() {
            return FileTarget::Missing;
        }

        let relative = Path::new(requested);
        if !is_confined(relative) {
            tracing::warn!(path = requested, "Rejected path escaping the document root");
            return FileTarget::Missing;
        }

        let path = root.join(relative);

        let (root, resolved) = match tokio::join!(fs::canonicalize(root), fs::canonicalize(&path)) {
            (Ok(root), Ok(resolved)) => (root, resolved),
            (Err(e), _) | (_, Err(e)) => {
                tracing::debug!(path = %path.display(), error = %e, "File not found");
                return FileTarget::Missing;
            }
        };

        if !resolved.starts_with(&root) {
            tracing::warn!(path = requested, "Rejected link leading out of the document root");
            return FileTarget::Missing;
        }

        // Only regular files are opened; opening a FIFO would block.
        match fs::metadata(&resolved).await {
            Ok(meta) if meta.is_file() => {}
            Ok(meta) if meta.is_dir() => return FileTarget::Directory { path },
            Ok(_) => {
                tracing::debug!(path = %path.display(), "Not a regular file");
                return FileTarget::Missing;
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Failed to stat file");
                return FileTarget::Missing;
            }
        }

        let file = match File::open(&resolved).await {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Failed to open file");
                return FileTarget::Missing;
            }
        };

        // The handle decides from here on, whatever happened to the path.
        match file.metadata().await {
            Ok(meta) if meta.is_file() => FileTarget::Regular { path, file },
            Ok(_) => FileTarget::Missing,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Failed to stat file");
                FileTarget::Missing
            }
        }
    }

    pub fn is_regular(&self) -> bool {
        matches!(self, FileTarget::Regular { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            FileTarget::Regular { path, .. } | FileTarget::Directory { path } => Some(path),
            FileTarget::Missing => None,
        }
    }

    /// The open file, if this target is a regular file.
    pub fn into_file(self) -> Option<File> {
        match self {
            FileTarget::Regular { file, .. } => Some(file),
            _ => None,
        }
    }
}

/// Only plain names and `.` may appear in a served path.
fn is_confined(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confined_paths() {
        assert!(is_confined(Path::new("index.html")));
        assert!(is_confined(Path::new("img/./logo.png")));
        assert!(!is_confined(Path::new("../secret")));
        assert!(!is_confined(Path::new("img/../../secret")));
        assert!(!is_confined(Path::new("/etc/passwd")));
    }

    #[tokio::test]
    async fn test_resolve_kinds() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"png").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        assert!(FileTarget::resolve(dir.path(), "a.png").await.is_regular());
        assert!(matches!(
            FileTarget::resolve(dir.path(), "sub").await,
            FileTarget::Directory { .. }
        ));
        assert!(matches!(
            FileTarget::resolve(dir.path(), "nope.png").await,
            FileTarget::Missing
        ));
        assert!(matches!(
            FileTarget::resolve(dir.path(), "").await,
            FileTarget::Missing
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fifo_is_not_opened() {
        let dir = tempfile::tempdir().unwrap();
        let fifo = dir.path().join("pipe.png");
        let status = std::process::Command::new("mkfifo").arg(&fifo).status().unwrap();
        assert!(status.success());

        let target = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            FileTarget::resolve(dir.path(), "pipe.png"),
        )
        .await
        .expect("resolving a FIFO blocked");

        assert!(matches!(target, FileTarget::Missing));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinks_stay_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(dir.path().join("outside.png"), b"private").unwrap();
        std::fs::write(root.join("inside.png"), b"public").unwrap();
        std::os::unix::fs::symlink(dir.path().join("outside.png"), root.join("escape.png")).unwrap();
        std::os::unix::fs::symlink(root.join("inside.png"), root.join("alias.png")).unwrap();

        assert!(matches!(
            FileTarget::resolve(&root, "escape.png").await,
            FileTarget::Missing
        ));
        assert!(FileTarget::resolve(&root, "alias.png").await.is_regular());
    }
}
