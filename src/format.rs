//! Reindenting by block depth.

use thiserror::Error;

use crate::lang::{self, LineClass};

const MAX_INDENT: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatOptionsError {
    #[error("indent size must be between 1 and {}, got {}", MAX_INDENT, .0)]
    InvalidIndent(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub indent_size: usize,
}

impl FormatOptions {
    pub fn new(indent_size: usize) -> Result<Self, FormatOptionsError> {
        if indent_size == 0 || indent_size > MAX_INDENT {
            return Err(FormatOptionsError::InvalidIndent(indent_size));
        }
        Ok(Self { indent_size })
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { indent_size: 4 }
    }
}

/// Re-emits every line trimmed and indented to its block depth. Closers
/// dedent before they are written, openers indent the lines after them.
/// Blank lines stay empty. The result has no trailing newline.
pub fn format_code(code: &str, options: &FormatOptions) -> String {
    let mut depth: usize = 0;
    let mut out: Vec<String> = Vec::new();

    for line in code.lines() {
        let trimmed = lang::trim(line);
        let class = lang::classify(trimmed);

        if class == LineClass::Closer {
            depth = depth.saturating_sub(1);
        }

        if trimmed.is_empty() {
            out.push(String::new());
        } else {
            out.push(format!("{}{}", " ".repeat(depth * options.indent_size), trimmed));
        }

        if let LineClass::Opener(_) = class {
            depth += 1;
        }
    }

    out.join("\n")
}
