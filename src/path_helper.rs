use std::path::{Path, PathBuf};

/// Joins a user-supplied path onto `root` and returns it with its
/// display form relative to `root`.
pub fn resolve(root: &Path, raw: &str) -> (PathBuf, String) {
    let full = root.join(raw);
    let display = normalized_relative(root, &full);
    (full, display)
}

pub fn normalized_relative(root: &Path, full: &Path) -> String {
    match full.strip_prefix(root) {
        Ok(rel) => {
            let s = rel.to_string_lossy();
            if cfg!(windows) {
                s.replace('\\', "/")
            } else {
                s.into_owned()
            }
        }
        Err(_) => full.to_string_lossy().into_owned(),
    }
}
