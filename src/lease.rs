//! Per-bundle leases for destructive archive operations
//!
//! Extract and restore both rename files inside one `Resources` directory.
//! A lease keyed by that directory keeps a second operation on the same
//! bundle from interleaving with the first. Operations on different bundles
//! never contend. Acquisition does not wait: a held lease is reported as
//! [`ArchiveError::OperationInProgress`].
//!
//! Keys are canonical paths, so `Resources`, `Resources/../Resources` and a
//! relative spelling of the same directory share one lease.

use crate::error::{ArchiveError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Table of `Resources` directories with an operation in flight
#[derive(Debug, Clone, Default)]
pub struct OperationLeases {
    held: Arc<Mutex<HashSet<PathBuf>>>,
}

impl OperationLeases {
    /// Create an empty lease table
    pub fn new() -> Self {
        Self::default()
    }

    /// Lease `resources_dir` until the returned guard is dropped
    pub fn try_acquire(&self, resources_dir: &Path) -> Result<OperationLease> {
        let key = lease_key(resources_dir);
        if !lock(&self.held).insert(key.clone()) {
            return Err(ArchiveError::OperationInProgress { resources_dir: key }.into());
        }
        Ok(OperationLease {
            held: Arc::clone(&self.held),
            key,
        })
    }

    /// Whether `resources_dir` is currently leased
    pub fn is_held(&self, resources_dir: &Path) -> bool {
        lock(&self.held).contains(&lease_key(resources_dir))
    }
}

// Falls back to the absolute spelling for directories that do not exist,
// which cannot alias anything on disk.
fn lease_key(resources_dir: &Path) -> PathBuf {
    std::fs::canonicalize(resources_dir)
        .or_else(|_| std::path::absolute(resources_dir))
        .unwrap_or_else(|_| resources_dir.to_path_buf())
}

/// Guard releasing its lease on drop
#[derive(Debug)]
pub struct OperationLease {
    held: Arc<Mutex<HashSet<PathBuf>>>,
    key: PathBuf,
}

impl OperationLease {
    /// The leased `Resources` directory, canonicalized
    pub fn resources_dir(&self) -> &Path {
        &self.key
    }
}

impl Drop for OperationLease {
    fn drop(&mut self) {
        lock(&self.held).remove(&self.key);
    }
}

// The set is only ever inserted into or removed from, so a poisoned lock
// still holds a consistent set.
fn lock(held: &Mutex<HashSet<PathBuf>>) -> MutexGuard<'_, HashSet<PathBuf>> {
    held.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn second_acquire_on_same_directory_fails() {
        let leases = OperationLeases::new();
        let dir = Path::new("/Applications/Foo.app/Contents/Resources");

        let _first = leases.try_acquire(dir).unwrap();
        match leases.try_acquire(dir) {
            Err(Error::Archive(ArchiveError::OperationInProgress { resources_dir })) => {
                assert_eq!(resources_dir, dir);
            }
            other => panic!("expected OperationInProgress, got {other:?}"),
        }
    }

    #[test]
    fn different_directories_do_not_contend() {
        let leases = OperationLeases::new();

        let _foo = leases
            .try_acquire(Path::new("/Applications/Foo.app/Contents/Resources"))
            .unwrap();
        let bar = leases.try_acquire(Path::new("/Applications/Bar.app/Contents/Resources"));

        assert!(bar.is_ok());
    }

    #[test]
    fn dropping_the_lease_releases_it() {
        let leases = OperationLeases::new();
        let dir = Path::new("/Applications/Foo.app/Contents/Resources");

        let lease = leases.try_acquire(dir).unwrap();
        assert!(leases.is_held(dir));
        assert_eq!(lease.resources_dir(), dir);

        drop(lease);
        assert!(!leases.is_held(dir));
        assert!(leases.try_acquire(dir).is_ok());
    }

    #[test]
    fn aliased_spellings_share_one_lease() {
        let temp = tempfile::TempDir::new().unwrap();
        let resources = temp.path().join("Resources");
        std::fs::create_dir(&resources).unwrap();
        let leases = OperationLeases::new();

        let _held = leases.try_acquire(&resources).unwrap();
        let alias = resources.join("..").join("Resources");

        assert!(leases.is_held(&alias));
        assert_eq!(
            leases.try_acquire(&alias).unwrap_err().error_code(),
            "operation_in_progress"
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_shares_the_target_lease() {
        let temp = tempfile::TempDir::new().unwrap();
        let resources = temp.path().join("Resources");
        std::fs::create_dir(&resources).unwrap();
        let link = temp.path().join("Linked");
        std::os::unix::fs::symlink(&resources, &link).unwrap();
        let leases = OperationLeases::new();

        let _held = leases.try_acquire(&link).unwrap();

        assert!(leases.try_acquire(&resources).is_err());
    }

    #[test]
    fn clones_share_the_same_table() {
        let leases = OperationLeases::new();
        let shared = leases.clone();
        let dir = Path::new("/R");

        let _lease = leases.try_acquire(dir).unwrap();
        assert!(shared.try_acquire(dir).is_err());
    }
}
