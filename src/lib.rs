//! Line-level heuristics for `end`-terminated Julia-style source.
//!
//! Nothing here tokenizes or parses: lines are classified by keyword
//! prefix and blocks are matched with a depth counter.

pub mod assign;
pub mod block;
pub mod format;
pub mod lang;
pub mod validate;

pub use assign::{count_assignments, extract_variables, Variable};
pub use block::{block_content, describe_block, detect_block, Block, BlockRange};
pub use format::{format_code, FormatOptions, FormatOptionsError};
pub use lang::{block_kind, classify, BlockKind, LineClass};
pub use validate::{validate_syntax, SyntaxIssue, Validation};
