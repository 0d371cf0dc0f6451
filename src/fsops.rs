//! Leaf filesystem operations: version, recursive directory sizing, existence
//! checks, and `mkdir -p`.
//!
//! Every function here is stateless. Nothing is cached between calls and each
//! call opens and releases its own directory handles.

use std::fs::{self, DirBuilder, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

use camino::Utf8Path;
use serde::Deserialize;
use tracing::debug;

use crate::error::FsError;

/// Library version reported by [`version`].
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Permission bits for directories created by [`make_dir_all`] (before umask).
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// What [`directory_size_with`] does when an entry below the root cannot be read.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EntryErrorPolicy {
    /// Count the entry as zero bytes and keep walking.
    #[default]
    Skip,
    /// Fail the whole traversal with the entry's error.
    Abort,
}

impl EntryErrorPolicy {
    fn absorb(self, path: &Path, err: io::Error) -> Result<(), FsError> {
        match self {
            EntryErrorPolicy::Skip => {
                debug!(path = %path.display(), error = %err, "skipping unreadable entry");
                Ok(())
            }
            EntryErrorPolicy::Abort => Err(FsError::from_read(path, err)),
        }
    }
}

pub fn version() -> &'static str {
    VERSION
}

/// [`VERSION`] as a parsed semantic version.
pub fn version_info() -> semver::Version {
    semver::Version::parse(VERSION).unwrap_or_else(|_| semver::Version::new(0, 0, 0))
}

/// Total size in bytes of everything under `path`, skipping unreadable entries.
///
/// See [`directory_size_with`].
pub fn directory_size(path: impl AsRef<Utf8Path>) -> Result<i64, FsError> {
    directory_size_with(path, EntryErrorPolicy::Skip)
}

/// Total size in bytes of everything under `path`.
///
/// Entries are inspected with `symlink_metadata`, so symbolic links are never
/// followed: a link contributes the size of the link itself. Directories are
/// recursed into; every other entry adds its reported length.
///
/// The root must be listable. Failing that yields
/// [`FsError::NotFoundOrNotADirectory`] or [`FsError::PermissionDenied`], never
/// `Ok(0)`. Failures further down are handled according to `policy`.
pub fn directory_size_with(
    path: impl AsRef<Utf8Path>,
    policy: EntryErrorPolicy,
) -> Result<i64, FsError> {
    let root = path.as_ref().as_std_path();
    let entries = fs::read_dir(root).map_err(|err| FsError::from_read(root, err))?;
    sum_entries(root, entries, policy)
}

fn sum_entries(dir: &Path, entries: ReadDir, policy: EntryErrorPolicy) -> Result<i64, FsError> {
    let mut total: i64 = 0;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                policy.absorb(dir, err)?;
                continue;
            }
        };

        let name = entry.file_name();
        if name == "." || name == ".." {
            continue;
        }

        let entry_path = dir.join(&name);
        let metadata = match fs::symlink_metadata(&entry_path) {
            Ok(metadata) => metadata,
            Err(err) => {
                policy.absorb(&entry_path, err)?;
                continue;
            }
        };

        let size = if metadata.is_dir() {
            match fs::read_dir(&entry_path) {
                Ok(children) => sum_entries(&entry_path, children, policy)?,
                Err(err) => {
                    policy.absorb(&entry_path, err)?;
                    0
                }
            }
        } else {
            i64::try_from(metadata.len()).unwrap_or(i64::MAX)
        };

        total = total.saturating_add(size);
    }

    Ok(total)
}

/// Whether anything is visible at `path`.
///
/// Symlinks are resolved, so a dangling link reports `false`. Paths that
/// cannot be inspected also report `false`.
pub fn path_exists(path: impl AsRef<Utf8Path>) -> bool {
    path.as_ref().as_std_path().try_exists().unwrap_or(false)
}

/// Create `path` and every missing ancestor, like `mkdir -p`.
///
/// `path` is split on `/`. Each prefix is created in turn with
/// [`DEFAULT_DIR_MODE`]; prefixes that already exist as directories are fine,
/// including the final one, so repeated calls succeed.
pub fn make_dir_all(path: impl AsRef<Utf8Path>) -> Result<(), FsError> {
    let raw = path.as_ref().as_str();
    if raw.is_empty() {
        return Err(FsError::CreationFailed {
            path: PathBuf::new(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty path"),
        });
    }

    let target = raw.trim_end_matches('/');
    if target.is_empty() {
        // Only separators: the filesystem root.
        return Ok(());
    }

    for (idx, _) in target.match_indices('/') {
        let prefix = &target[..idx];
        // Leading root separator and doubled separators add no new level.
        if prefix.is_empty() || prefix.ends_with('/') {
            continue;
        }
        create_level(Path::new(prefix))?;
    }

    create_level(Path::new(target))
}

fn create_level(dir: &Path) -> Result<(), FsError> {
    match dir_builder().create(dir) {
        Ok(()) => {
            debug!(path = %dir.display(), "created directory");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            if dir.is_dir() {
                Ok(())
            } else {
                Err(FsError::NameCollision {
                    path: dir.to_owned(),
                })
            }
        }
        Err(err) => Err(FsError::from_create(dir, err)),
    }
}

fn dir_builder() -> DirBuilder {
    #[allow(unused_mut)]
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DEFAULT_DIR_MODE);
    }
    builder
}
