mod depth;
mod entry;
mod tree;

pub use depth::{Depth, DepthMap, DepthValue};
pub use entry::{Entry, EntryKind, File};
pub use tree::Directory;
