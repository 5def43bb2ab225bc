use async_trait::async_trait;
use std::collections::HashMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

use crate::error::FsOp;

use super::{FileSystem, Stat, StatKind};

#[derive(Clone, Debug)]
enum Node {
    Dir(Vec<OsString>),
    File(u64),
    Other,
}

#[derive(Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    nodes: HashMap<PathBuf, Node>,
    errors: HashMap<(FsOp, PathBuf), (io::ErrorKind, String)>,
    barriers: HashMap<PathBuf, Arc<Barrier>>,
    calls: Vec<(FsOp, PathBuf)>,
    in_flight: usize,
    peak_in_flight: usize,
}

impl MockFileSystem {
    /// The tree used throughout the tests, rooted at `/work`:
    ///
    /// ```text
    /// dir-1/{dir-11/{file-11-1.txt}, dir-12/, dir-13/, file-1-1.txt}
    /// dir-2/{file-2-1.txt}
    /// file-1.txt, file-2.txt
    /// ```
    pub fn fixture() -> Self {
        let fs = Self::default();
        fs.add_dir("/work", &["dir-1", "dir-2", "file-1.txt", "file-2.txt"]);
        fs.add_dir("/work/dir-1", &["dir-11", "dir-12", "dir-13", "file-1-1.txt"]);
        fs.add_dir("/work/dir-1/dir-11", &["file-11-1.txt"]);
        fs.add_dir("/work/dir-1/dir-12", &[]);
        fs.add_dir("/work/dir-1/dir-13", &[]);
        fs.add_dir("/work/dir-2", &["file-2-1.txt"]);
        fs.add_file("/work/file-1.txt", 6);
        fs.add_file("/work/file-2.txt", 6);
        fs.add_file("/work/dir-1/file-1-1.txt", 8);
        fs.add_file("/work/dir-1/dir-11/file-11-1.txt", 9);
        fs.add_file("/work/dir-2/file-2-1.txt", 8);
        fs
    }

    pub fn add_dir(&self, dir: impl Into<PathBuf>, children: &[&str]) {
        let children = children.iter().map(OsString::from).collect();
        self.insert(dir.into(), Node::Dir(children));
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, size: u64) {
        self.insert(path.into(), Node::File(size));
    }

    pub fn add_special(&self, path: impl Into<PathBuf>) {
        self.insert(path.into(), Node::Other);
    }

    pub fn set_error(
        &self,
        op: FsOp,
        path: impl Into<PathBuf>,
        kind: io::ErrorKind,
        message: impl Into<String>,
    ) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .errors
            .insert((op, path.into()), (kind, message.into()));
    }

    /// Make every `stat` of `path` wait on `barrier` first.
    pub fn set_barrier(&self, path: impl Into<PathBuf>, barrier: Arc<Barrier>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.barriers.insert(path.into(), barrier);
    }

    pub fn calls(&self) -> Vec<(FsOp, PathBuf)> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }

    /// Highest number of calls that were in progress at the same time.
    pub fn peak_in_flight(&self) -> usize {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.peak_in_flight
    }

    fn insert(&self, path: PathBuf, node: Node) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.nodes.insert(path, node);
    }

    async fn call(&self, op: FsOp, path: &Path) -> io::Result<Node> {
        let barrier = {
            let mut inner = self.inner.lock().expect("mock fs lock");
            inner.calls.push((op, path.to_path_buf()));
            inner.in_flight += 1;
            inner.peak_in_flight = inner.peak_in_flight.max(inner.in_flight);
            match op {
                FsOp::Stat => inner.barriers.get(path).cloned(),
                FsOp::List => None,
            }
        };

        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        tokio::task::yield_now().await;

        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.in_flight -= 1;

        if let Some((kind, message)) = inner.errors.get(&(op, path.to_path_buf())) {
            return Err(io::Error::new(*kind, message.clone()));
        }
        inner.nodes.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no mock entry for {}", path.display()),
            )
        })
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<Stat> {
        let stat = match self.call(FsOp::Stat, path).await? {
            Node::Dir(_) => Stat {
                kind: StatKind::Directory,
                size: 4096,
            },
            Node::File(size) => Stat {
                kind: StatKind::File,
                size,
            },
            Node::Other => Stat {
                kind: StatKind::Other,
                size: 0,
            },
        };
        Ok(stat)
    }

    async fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        match self.call(FsOp::List, dir).await? {
            Node::Dir(children) => Ok(children),
            Node::File(_) | Node::Other => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                "Not a directory",
            )),
        }
    }
}
