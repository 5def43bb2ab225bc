use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::Directory;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Directory => "directory",
            EntryKind::File => "file",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A regular file captured during a walk.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename = "file")]
pub struct File {
    pub path: PathBuf,
    pub name: String,
    /// Extension with its leading dot (`".txt"`), or empty when the name has none.
    pub ext: String,
    pub size: u64,
}

impl File {
    pub fn new(path: PathBuf, size: u64) -> Self {
        let name = entry_name(&path);
        let ext = Path::new(&name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        Self {
            path,
            name,
            ext,
            size,
        }
    }
}

/// One node of a built tree. Both node types serialize their own `type` tag.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Directory(Directory),
    File(File),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Directory(_) => EntryKind::Directory,
            Entry::File(_) => EntryKind::File,
        }
    }
}

impl From<Directory> for Entry {
    fn from(dir: Directory) -> Self {
        Entry::Directory(dir)
    }
}

impl From<File> for Entry {
    fn from(file: File) -> Self {
        Entry::File(file)
    }
}

/// Base name of `path`; empty for paths without one (e.g. `/`).
pub(crate) fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
