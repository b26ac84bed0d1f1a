use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use jlblock::{block_content, describe_block};
use rayon::prelude::*;

use crate::error::CliError;
use crate::file_reader;
use crate::models::BlockEntry;
use crate::path_helper;

#[derive(Debug)]
pub struct CursorSpec {
    pub path: String,
    /// 1-based.
    pub line: usize,
}

pub fn parse_cursor_specs(raw: &[String], root: &Path) -> Result<Vec<CursorSpec>, CliError> {
    let mut specs = Vec::with_capacity(raw.len());
    for s in raw {
        let invalid = |reason: String| CliError::InvalidCursorSpec {
            spec: s.clone(),
            reason,
        };

        let (file_path, line_str) = s
            .rsplit_once(':')
            .ok_or_else(|| invalid("Expected format: path:line".into()))?;
        if file_path.is_empty() {
            return Err(invalid("Path is empty".into()));
        }

        let line: usize = line_str
            .parse()
            .map_err(|_| invalid(format!("Line '{}' is not an integer", line_str)))?;
        if line == 0 {
            return Err(invalid("Line numbers are 1-based".into()));
        }

        let (_, norm) = path_helper::resolve(root, file_path);
        specs.push(CursorSpec { path: norm, line });
    }
    Ok(specs)
}

/// Resolves every cursor, reading each distinct file once. Returns the
/// entries sorted by path then line, and the number of files read
/// successfully.
pub fn resolve_cursors(
    specs: &[CursorSpec],
    root: &Path,
    with_content: bool,
    cancelled: &AtomicBool,
) -> (Vec<BlockEntry>, usize) {
    let mut grouped: HashMap<&str, Vec<usize>> = HashMap::new();
    for spec in specs {
        grouped.entry(&spec.path).or_default().push(spec.line);
    }

    let groups: Vec<(&str, Vec<usize>)> = grouped.into_iter().collect();

    let per_file: Vec<(Vec<BlockEntry>, bool)> = groups
        .par_iter()
        .filter_map(|(rel_path, cursors)| {
            if cancelled.load(Ordering::Relaxed) {
                return None;
            }
            Some(resolve_file(root, rel_path, cursors, with_content))
        })
        .collect();

    let files_read = per_file.iter().filter(|(_, read)| *read).count();
    let mut entries: Vec<BlockEntry> = per_file.into_iter().flat_map(|(e, _)| e).collect();
    entries.sort_by(|a, b| {
        a.path.to_ascii_lowercase()
            .cmp(&b.path.to_ascii_lowercase())
            .then(a.line.cmp(&b.line))
    });
    (entries, files_read)
}

/// Entries for one file, and whether the file could be read.
fn resolve_file(
    root: &Path,
    rel_path: &str,
    cursors: &[usize],
    with_content: bool,
) -> (Vec<BlockEntry>, bool) {
    let content = match file_reader::read_file(&root.join(rel_path)) {
        Ok(c) => c,
        Err(e) => {
            let message = e.to_string();
            let entries: Vec<BlockEntry> = cursors
                .iter()
                .map(|&line| not_found(rel_path, line, Some(message.clone())))
                .collect();
            return (entries, false);
        }
    };

    let lines: Vec<&str> = content.lines().collect();
    let entries: Vec<BlockEntry> = cursors
        .iter()
        .map(|&line| match describe_block(&lines, line - 1) {
            Some(block) => BlockEntry {
                path: rel_path.to_owned(),
                line,
                found: true,
                kind: block.kind.map(|k| k.as_str()),
                start_line: block.range.start + 1,
                end_line: block.range.end + 1,
                content: with_content.then(|| block_content(&lines, block.range)),
                error: None,
            },
            None => {
                log::debug!("{}: line {} is past the last line ({})", rel_path, line, lines.len());
                not_found(rel_path, line, None)
            }
        })
        .collect();
    (entries, true)
}

fn not_found(path: &str, line: usize, error: Option<String>) -> BlockEntry {
    BlockEntry {
        path: path.to_owned(),
        line,
        found: false,
        kind: None,
        start_line: 0,
        end_line: 0,
        content: None,
        error,
    }
}
