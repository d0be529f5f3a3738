//! One-level directory snapshots
//!
//! Listings are produced fresh on every call and never cached. Deeper levels
//! are fetched by calling [`list_one_level`] again on a child directory.

use crate::types::{DirectoryNode, EntryType};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// List the immediate children of `dir_path`
///
/// Hidden entries (names starting with `.`) are excluded. Every directory is
/// reported with `has_children = true` without being opened. Entries are
/// sorted by name.
///
/// Never fails: if the directory itself cannot be read the failure is logged
/// and an empty listing is returned. Entries whose metadata cannot be read
/// (for example dangling symlinks) are skipped with a warning.
pub async fn list_one_level(dir_path: &Path) -> Vec<DirectoryNode> {
    let mut read_dir = match fs::read_dir(dir_path).await {
        Ok(read_dir) => read_dir,
        Err(e) => {
            warn!(?dir_path, error = %e, "error reading directory");
            return Vec::new();
        }
    };

    let mut nodes = Vec::new();
    loop {
        let entry = match read_dir.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!(?dir_path, error = %e, "error reading directory");
                return Vec::new();
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        // Follows symlinks, so a link to a directory lists as a directory.
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(?path, error = %e, "skipping entry with unreadable metadata");
                continue;
            }
        };

        let is_dir = metadata.is_dir();
        nodes.push(DirectoryNode {
            name,
            path,
            entry_type: if is_dir {
                EntryType::Directory
            } else {
                EntryType::File
            },
            has_children: is_dir,
            children: None,
        });
    }

    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(?dir_path, entries = nodes.len(), "listed directory");
    nodes
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn lists_files_and_directories_sorted() {
        let temp = TempDir::new().unwrap();
        stdfs::write(temp.path().join("b.txt"), b"b").unwrap();
        stdfs::create_dir(temp.path().join("a_dir")).unwrap();
        stdfs::write(temp.path().join("c.bin"), b"c").unwrap();

        let nodes = list_one_level(temp.path()).await;
        let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();

        assert_eq!(names, vec!["a_dir", "b.txt", "c.bin"]);
        assert!(nodes[0].is_dir());
        assert!(nodes[0].has_children);
        assert_eq!(nodes[1].entry_type, EntryType::File);
        assert!(!nodes[1].has_children);
        assert_eq!(nodes[1].path, temp.path().join("b.txt"));
        assert!(nodes.iter().all(|n| n.children.is_none()));
    }

    #[tokio::test]
    async fn hidden_entries_are_excluded() {
        let temp = TempDir::new().unwrap();
        stdfs::write(temp.path().join(".DS_Store"), b"").unwrap();
        stdfs::create_dir(temp.path().join(".git")).unwrap();
        stdfs::write(temp.path().join("visible"), b"").unwrap();

        let nodes = list_one_level(temp.path()).await;

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "visible");
        assert!(nodes.iter().all(|n| !n.name.starts_with('.')));
    }

    #[tokio::test]
    async fn empty_directory_still_reports_has_children() {
        let temp = TempDir::new().unwrap();
        stdfs::create_dir(temp.path().join("empty")).unwrap();

        let nodes = list_one_level(temp.path()).await;

        assert_eq!(nodes.len(), 1);
        assert!(
            nodes[0].has_children,
            "has_children is optimistic and must not inspect the directory"
        );
        assert!(list_one_level(&temp.path().join("empty")).await.is_empty());
    }

    #[tokio::test]
    async fn does_not_recurse() {
        let temp = TempDir::new().unwrap();
        stdfs::create_dir_all(temp.path().join("outer/inner")).unwrap();
        stdfs::write(temp.path().join("outer/inner/deep.txt"), b"").unwrap();

        let nodes = list_one_level(temp.path()).await;

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "outer");
    }

    #[tokio::test]
    async fn missing_directory_returns_empty() {
        let temp = TempDir::new().unwrap();
        let nodes = list_one_level(&temp.path().join("does-not-exist")).await;
        assert!(nodes.is_empty());
    }

    #[tokio::test]
    async fn file_path_returns_empty() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        stdfs::write(&file, b"x").unwrap();

        assert!(list_one_level(&file).await.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn dangling_symlink_is_skipped_not_fatal() {
        let temp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("broken")).unwrap();
        stdfs::write(temp.path().join("kept"), b"").unwrap();

        let nodes = list_one_level(temp.path()).await;

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "kept");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlink_to_directory_lists_as_directory() {
        let temp = TempDir::new().unwrap();
        stdfs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        let nodes = list_one_level(temp.path()).await;
        let link = nodes.iter().find(|n| n.name == "link").unwrap();

        assert!(link.is_dir());
    }

    #[tokio::test]
    async fn each_call_sees_fresh_contents() {
        let temp = TempDir::new().unwrap();
        assert!(list_one_level(temp.path()).await.is_empty());

        stdfs::write(temp.path().join("new.txt"), b"").unwrap();
        assert_eq!(list_one_level(temp.path()).await.len(), 1);
    }
}
