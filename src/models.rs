pub struct MetaInfo {
    pub elapsed_ms: u128,
    pub timeout: bool,
    pub files_read: usize,
    pub total_assignments: Option<usize>,
}

/// One resolved cursor. Lines are 1-based.
pub struct BlockEntry {
    pub path: String,
    pub line: usize,
    pub found: bool,
    pub kind: Option<&'static str>,
    pub start_line: usize,
    pub end_line: usize,
    pub content: Option<String>,
    pub error: Option<String>,
}

pub struct VariableEntry {
    pub name: String,
    pub line: usize,
}

pub struct CountEntry {
    pub path: String,
    pub assignments: usize,
    pub variables: Option<Vec<VariableEntry>>,
    pub error: Option<String>,
}

pub struct IssueEntry {
    pub line: usize,
    pub message: String,
}

pub struct CheckEntry {
    pub path: String,
    pub valid: bool,
    pub issues: Vec<IssueEntry>,
    pub error: Option<String>,
}

#[derive(Default)]
pub struct OutputEnvelope {
    pub meta: Option<MetaInfo>,
    pub blocks: Option<Vec<BlockEntry>>,
    pub counts: Option<Vec<CountEntry>>,
    pub checks: Option<Vec<CheckEntry>>,
    pub error: Option<String>,
}

impl OutputEnvelope {
    pub fn from_error(error: impl std::fmt::Display) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}
