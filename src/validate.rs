//! Block balance checking.
//!
//! Uses the same opener/closer classification as the block locator, so a
//! file that validates cleanly is one where every cursor resolves to a
//! terminated block.

use thiserror::Error;

use crate::lang::{self, BlockKind, LineClass};

/// A balance problem found on a specific 0-based line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxIssue {
    #[error("line {}: `end` without a matching block start", .line + 1)]
    UnexpectedEnd { line: usize },
    #[error("line {}: unclosed {kind} block", .line + 1)]
    Unclosed { kind: BlockKind, line: usize },
}

impl SyntaxIssue {
    pub fn line(&self) -> usize {
        match self {
            SyntaxIssue::UnexpectedEnd { line } | SyntaxIssue::Unclosed { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub issues: Vec<SyntaxIssue>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Reports stray closers in line order, then every opener left open,
/// outermost first.
pub fn validate_syntax(code: &str) -> Validation {
    let mut issues = Vec::new();
    let mut open: Vec<(BlockKind, usize)> = Vec::new();

    for (line, text) in code.lines().enumerate() {
        match lang::classify(text) {
            LineClass::Opener(kind) => open.push((kind, line)),
            LineClass::Closer => {
                if open.pop().is_none() {
                    issues.push(SyntaxIssue::UnexpectedEnd { line });
                }
            }
            LineClass::Other => {}
        }
    }

    issues.extend(open.into_iter().map(|(kind, line)| SyntaxIssue::Unclosed { kind, line }));
    if !issues.is_empty() {
        log::debug!("block balance check found {} issue(s)", issues.len());
    }
    Validation { issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_code_is_valid() {
        let code = "module M\nfunction f(x)\n  if x > 0\n    x\n  end\nend\nend\n";
        assert!(validate_syntax(code).is_valid());
    }

    #[test]
    fn empty_code_is_valid() {
        assert!(validate_syntax("").is_valid());
    }

    #[test]
    fn stray_end_is_reported() {
        let v = validate_syntax("x = 1\nend\n");
        assert_eq!(v.issues, vec![SyntaxIssue::UnexpectedEnd { line: 1 }]);
    }

    #[test]
    fn unclosed_blocks_reported_outermost_first() {
        let v = validate_syntax("function f()\n  for i in 1:3\n    g(i)\n");
        assert_eq!(
            v.issues,
            vec![
                SyntaxIssue::Unclosed { kind: BlockKind::Function, line: 0 },
                SyntaxIssue::Unclosed { kind: BlockKind::For, line: 1 },
            ]
        );
    }

    #[test]
    fn stray_end_does_not_absorb_later_opener() {
        let v = validate_syntax("end\nbegin\n");
        assert_eq!(
            v.issues,
            vec![
                SyntaxIssue::UnexpectedEnd { line: 0 },
                SyntaxIssue::Unclosed { kind: BlockKind::Begin, line: 1 },
            ]
        );
    }

    #[test]
    fn messages_use_one_based_lines() {
        let v = validate_syntax("if x\n");
        assert_eq!(v.issues[0].to_string(), "line 1: unclosed if block");
        assert_eq!(v.issues[0].line(), 0);
        let v = validate_syntax("\n\nend");
        assert_eq!(v.issues[0].to_string(), "line 3: `end` without a matching block start");
    }
}
