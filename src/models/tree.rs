use serde::Serialize;
use std::path::PathBuf;

use super::File;
use super::entry::entry_name;

/// A directory node.
///
/// `is_searched` is set when the directory's immediate children were listed;
/// `is_fully_searched` additionally requires every descendant directory to be
/// fully searched. An unsearched directory has no children and a size of zero.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename = "directory")]
pub struct Directory {
    pub path: PathBuf,
    pub name: String,
    pub dirs: Vec<Directory>,
    pub files: Vec<File>,
    pub size: u64,
    pub is_searched: bool,
    pub is_fully_searched: bool,
}

impl Directory {
    /// A directory whose children were not listed.
    pub fn unsearched(path: PathBuf) -> Self {
        Self {
            name: entry_name(&path),
            path,
            dirs: Vec::new(),
            files: Vec::new(),
            size: 0,
            is_searched: false,
            is_fully_searched: false,
        }
    }

    /// A listed directory. Size and search completeness are derived from the children.
    pub fn searched(path: PathBuf, dirs: Vec<Directory>, files: Vec<File>) -> Self {
        let size = dirs.iter().map(|dir| dir.size).sum::<u64>()
            + files.iter().map(|file| file.size).sum::<u64>();
        let is_fully_searched = dirs.iter().all(|dir| dir.is_fully_searched);
        Self {
            name: entry_name(&path),
            path,
            dirs,
            files,
            size,
            is_searched: true,
            is_fully_searched,
        }
    }

    /// This directory (when `include_self`) followed by every descendant
    /// directory, depth-first pre-order.
    pub fn directories(&self, include_self: bool) -> Vec<&Directory> {
        let mut out = Vec::new();
        if include_self {
            out.push(self);
        }
        for dir in &self.dirs {
            dir.collect_directories(&mut out);
        }
        out
    }

    fn collect_directories<'a>(&'a self, out: &mut Vec<&'a Directory>) {
        out.push(self);
        for dir in &self.dirs {
            dir.collect_directories(out);
        }
    }

    /// Every file below this directory: this level's files first, then each
    /// child directory's files in listing order.
    pub fn files(&self) -> Vec<&File> {
        let mut out = Vec::new();
        self.collect_files(&mut out);
        out
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a File>) {
        out.extend(self.files.iter());
        for dir in &self.dirs {
            dir.collect_files(out);
        }
    }

    pub fn entry_count(&self) -> usize {
        self.dirs.len() + self.files.len()
    }
}
