use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt, try_join_all};
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{debug, trace};

use crate::error::{FsOp, Result, TreeError};
use crate::fs::{FileSystem, RealFileSystem, Stat, StatKind};
use crate::models::{Depth, DepthMap, Directory, Entry, File};
use crate::paths;

/// Configuration options for tree building.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Upper bound on filesystem calls in flight at once (None means unlimited)
    pub max_concurrency: Option<usize>,
}

/// Builds depth-limited directory trees over a [`FileSystem`].
///
/// Sibling subtrees are explored concurrently. The first failing filesystem
/// call fails the whole build and no partial tree is returned.
pub struct TreeBuilder<F> {
    fs: F,
    limiter: Option<Semaphore>,
}

impl<F: FileSystem> TreeBuilder<F> {
    pub fn new(fs: F) -> Self {
        Self { fs, limiter: None }
    }

    pub fn with_options(fs: F, options: &BuildOptions) -> Result<Self> {
        let limiter = match options.max_concurrency {
            Some(0) => {
                return Err(TreeError::invalid(
                    "max_concurrency must be at least 1",
                ));
            }
            Some(limit) => Some(Semaphore::new(limit)),
            None => None,
        };

        Ok(Self { fs, limiter })
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Build the tree rooted at `root`.
    ///
    /// The root's immediate children are always listed; `depth` counts the
    /// additional levels below them. `root` is resolved against the current
    /// directory and must be a directory.
    pub async fn build(&self, root: impl AsRef<Path>, depth: impl Into<Depth>) -> Result<Directory> {
        let depth = depth.into().validate()?;
        let root = paths::resolve(root.as_ref()).map_err(TreeError::CurrentDir)?;
        debug!(root = %root.display(), %depth, "building tree");

        let stat = self.stat(&root).await?;
        if stat.kind != StatKind::Directory {
            return Err(TreeError::NotADirectory { path: root });
        }

        self.visit_directory(root, depth).await
    }

    /// Build one tree per entry of the flattened `map`, concurrently.
    ///
    /// Results follow the flattened order. Any failure fails the batch.
    pub async fn build_many(&self, map: &DepthMap) -> Result<Vec<Directory>> {
        let flat = map.flatten();
        debug!(trees = flat.len(), "building trees");
        try_join_all(flat.into_iter().map(|(path, depth)| self.build(path, depth))).await
    }

    fn visit(&self, path: PathBuf, depth: Depth) -> BoxFuture<'_, Result<Option<Entry>>> {
        async move {
            let stat = self.stat(&path).await?;
            match stat.kind {
                StatKind::File => Ok(Some(Entry::File(File::new(path, stat.size)))),
                StatKind::Directory => {
                    let dir = self.visit_directory(path, depth).await?;
                    Ok(Some(Entry::Directory(dir)))
                }
                StatKind::Other => {
                    debug!(path = %path.display(), "skipping special file");
                    Ok(None)
                }
            }
        }
        .boxed()
    }

    async fn visit_directory(&self, path: PathBuf, depth: Depth) -> Result<Directory> {
        if !depth.allows_listing() {
            return Ok(Directory::unsearched(path));
        }

        let names = self.list(&path).await?;
        trace!(dir = %path.display(), entries = names.len(), "listed directory");

        let child_depth = depth.descend();
        let children = try_join_all(
            names
                .iter()
                .map(|name| self.visit(path.join(name), child_depth)),
        )
        .await?;

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for child in children.into_iter().flatten() {
            match child {
                Entry::Directory(dir) => dirs.push(dir),
                Entry::File(file) => files.push(file),
            }
        }

        Ok(Directory::searched(path, dirs, files))
    }

    async fn stat(&self, path: &Path) -> Result<Stat> {
        let _permit = self.permit().await;
        self.fs
            .stat(path)
            .await
            .map_err(|source| TreeError::io(FsOp::Stat, path, source))
    }

    async fn list(&self, dir: &Path) -> Result<Vec<OsString>> {
        let _permit = self.permit().await;
        self.fs
            .list_dir(dir)
            .await
            .map_err(|source| TreeError::io(FsOp::List, dir, source))
    }

    async fn permit(&self) -> Option<SemaphorePermit<'_>> {
        match &self.limiter {
            // The semaphore is never closed, so acquire cannot fail.
            Some(limiter) => limiter.acquire().await.ok(),
            None => None,
        }
    }
}

/// Build the tree rooted at `root` from the real filesystem.
pub async fn build_tree(root: impl AsRef<Path>, depth: impl Into<Depth>) -> Result<Directory> {
    TreeBuilder::new(RealFileSystem).build(root, depth).await
}

/// Build every tree named by `map` from the real filesystem.
pub async fn build_trees(map: &DepthMap) -> Result<Vec<Directory>> {
    TreeBuilder::new(RealFileSystem).build_many(map).await
}
