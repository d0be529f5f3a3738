//! Filesystem snapshots and assertions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a tree entry is, with file contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    /// Directory
    Dir,
    /// File and its bytes
    File(Vec<u8>),
}

/// Every entry under `root`, keyed by path relative to `root`
pub fn snapshot_tree(root: &Path) -> BTreeMap<PathBuf, TreeEntry> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| entry.unwrap())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let value = if entry.file_type().is_dir() {
                TreeEntry::Dir
            } else {
                TreeEntry::File(std::fs::read(entry.path()).unwrap())
            };
            (relative, value)
        })
        .collect()
}

/// Assert two snapshots are identical, listing what differs
pub fn assert_same_tree(
    before: &BTreeMap<PathBuf, TreeEntry>,
    after: &BTreeMap<PathBuf, TreeEntry>,
) {
    let added: Vec<_> = after.keys().filter(|k| !before.contains_key(*k)).collect();
    let removed: Vec<_> = before.keys().filter(|k| !after.contains_key(*k)).collect();
    let changed: Vec<_> = before
        .iter()
        .filter(|(k, v)| after.get(*k).is_some_and(|a| a != *v))
        .map(|(k, _)| k)
        .collect();

    assert!(
        added.is_empty() && removed.is_empty() && changed.is_empty(),
        "tree differs: added {added:?}, removed {removed:?}, changed {changed:?}"
    );
}
