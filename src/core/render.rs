use std::io::{self, Write};
use std::path::MAIN_SEPARATOR;

use owo_colors::{OwoColorize, Style};

use crate::models::Directory;

pub const UNSEARCHED_MESSAGE: &str = "/* unsearched directory tree */";

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// The kind of text fragment being emitted, so a [`Styler`] can decorate it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    Root,
    Directory,
    File,
    Indent,
    Message,
}

/// Decorates rendered tokens. Any `Fn(TokenKind, &str) -> String` is a styler.
pub trait Styler {
    fn paint(&self, kind: TokenKind, text: &str) -> String;
}

impl<F> Styler for F
where
    F: Fn(TokenKind, &str) -> String,
{
    fn paint(&self, kind: TokenKind, text: &str) -> String {
        self(kind, text)
    }
}

/// Leaves every token untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn paint(&self, _kind: TokenKind, text: &str) -> String {
        text.to_owned()
    }
}

/// ANSI colors: root on a blue background, directories blue, files yellow.
#[derive(Clone, Copy, Debug)]
pub struct AnsiStyler {
    pub root: Style,
    pub directory: Style,
    pub file: Style,
}

impl Default for AnsiStyler {
    fn default() -> Self {
        Self {
            root: Style::new().on_blue(),
            directory: Style::new().blue(),
            file: Style::new().yellow(),
        }
    }
}

impl Styler for AnsiStyler {
    fn paint(&self, kind: TokenKind, text: &str) -> String {
        match kind {
            TokenKind::Root => text.style(self.root).to_string(),
            TokenKind::Directory => text.style(self.directory).to_string(),
            TokenKind::File => text.style(self.file).to_string(),
            TokenKind::Indent | TokenKind::Message => text.to_owned(),
        }
    }
}

/// Render `root` as a box-drawing tree, optionally with ANSI colors.
pub fn render(root: &Directory, use_colors: bool) -> String {
    if use_colors {
        render_with(root, &AnsiStyler::default())
    } else {
        render_with(root, &PlainStyler)
    }
}

pub fn render_with(root: &Directory, styler: &dyn Styler) -> String {
    let mut lines = Lines {
        styler,
        out: Vec::new(),
    };

    let root_text = format!("{}{MAIN_SEPARATOR}", root.path.display());
    lines.push(&[(TokenKind::Root, root_text.as_str())]);
    lines.children(root, &[]);

    lines.out.join(LINE_ENDING)
}

/// Write the rendered tree to `writer`, without a trailing line ending.
pub fn write_tree<W: Write>(
    writer: &mut W,
    root: &Directory,
    styler: &dyn Styler,
) -> io::Result<()> {
    writer.write_all(render_with(root, styler).as_bytes())
}

struct Lines<'a> {
    styler: &'a dyn Styler,
    out: Vec<String>,
}

impl Lines<'_> {
    fn push(&mut self, tokens: &[(TokenKind, &str)]) {
        let line = tokens
            .iter()
            .map(|&(kind, text)| self.styler.paint(kind, text))
            .collect::<String>();
        self.out.push(line);
    }

    // Directories come before files; "last" is judged over both together.
    fn children(&mut self, dir: &Directory, ancestor_has_more: &[bool]) {
        let total = dir.entry_count();

        for (index, child) in dir.dirs.iter().enumerate() {
            let is_last = index + 1 == total;
            let name = format!("{}{MAIN_SEPARATOR}", child.name);
            self.push(&[
                (TokenKind::Indent, branch(ancestor_has_more, is_last).as_str()),
                (TokenKind::Directory, name.as_str()),
            ]);

            let mut next_ancestor_has_more = ancestor_has_more.to_vec();
            next_ancestor_has_more.push(!is_last);

            if child.is_searched {
                self.children(child, &next_ancestor_has_more);
            } else {
                let indent = continuation(&next_ancestor_has_more) + BLANK;
                self.push(&[
                    (TokenKind::Indent, indent.as_str()),
                    (TokenKind::Message, UNSEARCHED_MESSAGE),
                ]);
            }
        }

        for (index, file) in dir.files.iter().enumerate() {
            let is_last = dir.dirs.len() + index + 1 == total;
            self.push(&[
                (TokenKind::Indent, branch(ancestor_has_more, is_last).as_str()),
                (TokenKind::File, file.name.as_str()),
            ]);
        }
    }
}

fn continuation(ancestor_has_more: &[bool]) -> String {
    ancestor_has_more
        .iter()
        .map(|&has_more| if has_more { PIPE } else { BLANK })
        .collect()
}

fn branch(ancestor_has_more: &[bool], is_last: bool) -> String {
    continuation(ancestor_has_more) + if is_last { LAST_BRANCH } else { BRANCH }
}
