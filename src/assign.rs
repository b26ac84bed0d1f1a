use std::sync::OnceLock;

use regex::Regex;

/// Leading identifier followed by a lone `=` (not `==` or `=>`).
const ASSIGNMENT_LHS: &str = r"^\s*([A-Za-z_][A-Za-z0-9_!]*)\s*=(?:[^=>]|$)";

/// A name bound by an assignment at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    /// 0-based line within the scanned fragment.
    pub line: usize,
}

/// Counts `=` characters that look like plain assignment.
///
/// An `=` counts only when it has a neighbour on both sides, the left one is
/// not `=`, `!`, `<` or `>`, and the right one is not `=`. Every position is
/// checked independently, so runs like `===` are judged one byte at a time.
pub fn count_assignments(text: &str) -> usize {
    text.as_bytes()
        .windows(3)
        .filter(|w| w[1] == b'=' && !matches!(w[0], b'=' | b'!' | b'<' | b'>') && w[2] != b'=')
        .count()
}

/// Lists `name = ...` bindings, one per line at most.
pub fn extract_variables(code: &str) -> Vec<Variable> {
    static LHS: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = LHS.get_or_init(|| Regex::new(ASSIGNMENT_LHS).ok()).as_ref() else {
        return Vec::new();
    };

    code.lines()
        .enumerate()
        .filter_map(|(line, text)| {
            let name = re.captures(text)?.get(1)?;
            // `y!=2` is an inequality, not an assignment to `y!`.
            if name.as_str().ends_with('!') && text[name.end()..].starts_with('=') {
                return None;
            }
            Some(Variable { name: name.as_str().to_owned(), line })
        })
        .collect()
}
