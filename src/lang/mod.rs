mod common;

use std::fmt;

pub use common::{is_block_end, is_block_start, trim};

/// The construct a block opener line introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Function,
    Macro,
    Module,
    Struct,
    MutableStruct,
    Begin,
    Quote,
    Let,
    For,
    While,
    If,
    Try,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Function => "function",
            BlockKind::Macro => "macro",
            BlockKind::Module => "module",
            BlockKind::Struct => "struct",
            BlockKind::MutableStruct => "mutable_struct",
            BlockKind::Begin => "begin",
            BlockKind::Quote => "quote",
            BlockKind::Let => "let",
            BlockKind::For => "for",
            BlockKind::While => "while",
            BlockKind::If => "if",
            BlockKind::Try => "try",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a single line participates in block nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Opener(BlockKind),
    Closer,
    Other,
}

/// Returns the kind of block `line` opens, if any.
///
/// Agrees with [`is_block_start`]: a line has a kind exactly when it is an
/// opener.
pub fn block_kind(line: &str) -> Option<BlockKind> {
    let trimmed = trim(line);
    common::OPENERS
        .iter()
        .find(|(prefix, _)| trimmed.starts_with(prefix))
        .map(|&(_, kind)| kind)
}

/// Classifies a line. A line that looks like both an opener and a closer
/// is an opener.
pub fn classify(line: &str) -> LineClass {
    if let Some(kind) = block_kind(line) {
        LineClass::Opener(kind)
    } else if is_block_end(line) {
        LineClass::Closer
    } else {
        LineClass::Other
    }
}
