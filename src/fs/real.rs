use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use tokio::task;

use super::{FileSystem, Stat, StatKind};

#[derive(Clone, Copy, Debug, Default)]
pub struct RealFileSystem;

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<Stat> {
        let metadata = tokio::fs::metadata(path).await?;
        let kind = if metadata.is_dir() {
            StatKind::Directory
        } else if metadata.is_file() {
            StatKind::File
        } else {
            StatKind::Other
        };

        Ok(Stat {
            kind,
            size: metadata.len(),
        })
    }

    async fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        let dir = dir.to_path_buf();
        task::spawn_blocking(move || {
            let mut names = Vec::new();
            for entry in std::fs::read_dir(&dir)? {
                names.push(entry?.file_name());
            }
            Ok(names)
        })
        .await?
    }
}
