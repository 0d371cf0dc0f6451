use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure kinds surfaced by the filesystem operations in [`crate::fsops`].
#[derive(Debug, Error)]
pub enum FsError {
    #[error("{} does not exist or is not a directory", path.display())]
    NotFoundOrNotADirectory { path: PathBuf },

    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("{} exists but is not a directory", path.display())]
    NameCollision { path: PathBuf },

    #[error("creating directory {}", path.display())]
    CreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Classify an error raised while opening or reading `path` for listing.
    pub(crate) fn from_read(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied {
                path: path.to_owned(),
            },
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
                FsError::NotFoundOrNotADirectory {
                    path: path.to_owned(),
                }
            }
            _ => FsError::Io {
                path: path.to_owned(),
                source: err,
            },
        }
    }

    /// Classify an error raised by a single-level directory creation.
    pub(crate) fn from_create(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied {
                path: path.to_owned(),
            },
            io::ErrorKind::NotADirectory => FsError::NameCollision {
                path: path.to_owned(),
            },
            _ => FsError::CreationFailed {
                path: path.to_owned(),
                source: err,
            },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FsError::NotFoundOrNotADirectory { path }
            | FsError::PermissionDenied { path }
            | FsError::NameCollision { path }
            | FsError::CreationFailed { path, .. }
            | FsError::Io { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_errors_are_classified_by_kind() {
        let path = Path::new("/nowhere");
        let err = FsError::from_read(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, FsError::NotFoundOrNotADirectory { .. }));

        let err = FsError::from_read(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, FsError::PermissionDenied { .. }));

        let err = FsError::from_read(path, io::Error::other("disk on fire"));
        assert!(matches!(err, FsError::Io { .. }));
        assert_eq!(err.path(), path);
    }

    #[test]
    fn create_errors_keep_the_source() {
        let err = FsError::from_create(
            Path::new("/ro/dir"),
            io::Error::from(io::ErrorKind::ReadOnlyFilesystem),
        );
        match err {
            FsError::CreationFailed { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::ReadOnlyFilesystem)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
