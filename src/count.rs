use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use jlblock::{count_assignments, extract_variables};
use rayon::prelude::*;

use crate::file_reader;
use crate::models::{CountEntry, VariableEntry};
use crate::path_helper;

pub fn count_files(
    file_paths: &[String],
    root: &Path,
    with_vars: bool,
    cancelled: &AtomicBool,
) -> (Vec<CountEntry>, usize) {
    let mut entries: Vec<CountEntry> = file_paths
        .par_iter()
        .filter_map(|file_path| {
            if cancelled.load(Ordering::Relaxed) {
                return None;
            }
            Some(process_file(file_path, root, with_vars))
        })
        .collect();

    let total: usize = entries.iter().map(|e| e.assignments).sum();
    entries.sort_by(|a, b| a.path.to_ascii_lowercase().cmp(&b.path.to_ascii_lowercase()));
    (entries, total)
}

fn process_file(file_path: &str, root: &Path, with_vars: bool) -> CountEntry {
    let (full, relative) = path_helper::resolve(root, file_path);

    let content = match file_reader::read_file(&full) {
        Ok(c) => c,
        Err(e) => {
            return CountEntry {
                path: relative,
                assignments: 0,
                variables: None,
                error: Some(e.to_string()),
            };
        }
    };

    let variables = with_vars.then(|| {
        extract_variables(&content)
            .into_iter()
            .map(|v| VariableEntry { name: v.name, line: v.line + 1 })
            .collect()
    });

    CountEntry {
        path: relative,
        assignments: count_assignments(&content),
        variables,
        error: None,
    }
}
