mod render;
mod walk;

pub use render::{
    AnsiStyler, LINE_ENDING, PlainStyler, Styler, TokenKind, UNSEARCHED_MESSAGE, render,
    render_with, write_tree,
};
pub use walk::{BuildOptions, TreeBuilder, build_tree, build_trees};
