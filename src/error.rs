use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The filesystem call that failed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FsOp {
    Stat,
    List,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsOp::Stat => f.write_str("stat"),
            FsOp::List => f.write_str("list"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to {op} '{}': {source}", path.display())]
    Io {
        op: FsOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read the current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

impl TreeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TreeError::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn io(op: FsOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        TreeError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Kind of the underlying filesystem error, if this is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            TreeError::Io { source, .. } | TreeError::CurrentDir(source) => Some(source.kind()),
            TreeError::InvalidArgument { .. } | TreeError::NotADirectory { .. } => None,
        }
    }
}

pub type Result<T, E = TreeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_operation_and_path() {
        let err = TreeError::io(
            FsOp::List,
            "/work/secret",
            io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        );
        assert_eq!(
            err.to_string(),
            "failed to list '/work/secret': Permission denied"
        );
        assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
    }

    #[test]
    fn argument_errors_have_no_io_kind() {
        assert_eq!(TreeError::invalid("depth").io_kind(), None);
        let err = TreeError::NotADirectory {
            path: PathBuf::from("/work/file-1.txt"),
        };
        assert_eq!(err.to_string(), "'/work/file-1.txt' is not a directory");
    }
}
