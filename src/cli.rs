use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use dirtree::Depth;

#[derive(Parser, Debug)]
#[command(name = "dirtree")]
#[command(about = "Print a depth-limited directory tree", long_about = None)]
pub struct Cli {
    /// Root directory to print (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Levels to descend below the root's own listing
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub depth: i64,

    /// Descend without a depth limit
    #[arg(short, long, conflicts_with = "depth")]
    pub all: bool,

    /// JSON file mapping paths to depths; prints one tree per entry
    #[arg(long, conflicts_with_all = ["path", "depth", "all"])]
    pub spec: Option<PathBuf>,

    /// When to color the output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Print the tree as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Append directory, file, and byte totals
    #[arg(long)]
    pub summary: bool,

    /// Maximum filesystem calls in flight at once
    #[arg(short = 'j', long)]
    pub max_concurrency: Option<usize>,
}

impl Cli {
    pub fn depth(&self) -> Depth {
        if self.all {
            Depth::Unbounded
        } else {
            Depth::Levels(self.depth)
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                is_terminal && std::env::var_os("NO_COLOR").is_none_or(|value| value.is_empty())
            }
        }
    }
}
