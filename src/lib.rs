//! Depth-limited, concurrent directory trees and their box-drawing rendering.

pub mod core;
pub mod error;
pub mod fs;
pub mod models;
mod paths;

pub use crate::core::{
    AnsiStyler, BuildOptions, PlainStyler, Styler, TokenKind, TreeBuilder, build_tree,
    build_trees, render, render_with,
};
pub use error::{FsOp, TreeError};
pub use models::{Depth, DepthMap, DepthValue, Directory, Entry, EntryKind, File};

/// Directory count, file count, and byte total of a set of built trees.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub directories: usize,
    pub files: usize,
    pub bytes: u64,
}

impl Summary {
    /// Totals over `trees`; the roots themselves are not counted as directories.
    pub fn of<'a>(trees: impl IntoIterator<Item = &'a Directory>) -> Self {
        trees
            .into_iter()
            .fold(Summary::default(), |summary, tree| Summary {
                directories: summary.directories + tree.directories(false).len(),
                files: summary.files + tree.files().len(),
                bytes: summary.bytes + tree.size,
            })
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let directories = if self.directories == 1 {
            "directory"
        } else {
            "directories"
        };
        let files = if self.files == 1 { "file" } else { "files" };
        write!(
            f,
            "{} {directories}, {} {files}, {} bytes",
            self.directories, self.files, self.bytes
        )
    }
}
