mod real;

#[cfg(test)]
mod mock;

pub use real::RealFileSystem;

#[cfg(test)]
pub use mock::MockFileSystem;

use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatKind {
    Directory,
    File,
    /// Sockets, fifos, devices. Skipped by the builder.
    Other,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stat {
    pub kind: StatKind,
    pub size: u64,
}

#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Metadata for `path`, following symlinks.
    async fn stat(&self, path: &Path) -> io::Result<Stat>;

    /// Raw names of the immediate children of `dir`, in the order the platform reports them.
    async fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>>;
}
