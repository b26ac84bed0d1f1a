use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use jlblock::validate_syntax;
use rayon::prelude::*;

use crate::file_reader;
use crate::models::{CheckEntry, IssueEntry};
use crate::path_helper;

pub fn check_files(file_paths: &[String], root: &Path, cancelled: &AtomicBool) -> Vec<CheckEntry> {
    let mut entries: Vec<CheckEntry> = file_paths
        .par_iter()
        .filter_map(|file_path| {
            if cancelled.load(Ordering::Relaxed) {
                return None;
            }
            Some(check_file(file_path, root))
        })
        .collect();

    entries.sort_by(|a, b| a.path.to_ascii_lowercase().cmp(&b.path.to_ascii_lowercase()));
    entries
}

fn check_file(file_path: &str, root: &Path) -> CheckEntry {
    let (full, relative) = path_helper::resolve(root, file_path);

    let content = match file_reader::read_file(&full) {
        Ok(c) => c,
        Err(e) => {
            return CheckEntry {
                path: relative,
                valid: false,
                issues: Vec::new(),
                error: Some(e.to_string()),
            };
        }
    };

    let validation = validate_syntax(&content);
    CheckEntry {
        path: relative,
        valid: validation.is_valid(),
        issues: validation
            .issues
            .iter()
            .map(|issue| IssueEntry { line: issue.line() + 1, message: issue.to_string() })
            .collect(),
        error: None,
    }
}
