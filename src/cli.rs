use jlblock::FormatOptions;

use crate::error::CliError;

pub enum Mode {
    /// Raw `path:line` cursor specs.
    Blocks(Vec<String>),
    Count(Vec<String>),
    Check(Vec<String>),
    Format(String),
}

pub struct CliArgs {
    pub root: String,
    pub mode: Mode,
    pub content: bool,
    pub vars: bool,
    pub json: bool,
    pub timeout: Option<u64>,
    pub format: FormatOptions,
}

pub enum CliAction {
    Run(CliArgs),
    Help,
    Version,
}

fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, CliError> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingValue(flag.to_owned()))
}

fn parse_int<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, CliError> {
    value.parse::<T>().map_err(|_| CliError::InvalidInteger {
        flag: flag.to_owned(),
        value: value.to_owned(),
    })
}

pub fn parse_args(args: &[String]) -> Result<CliAction, CliError> {
    let mut root: Option<String> = None;
    let mut cursors: Vec<String> = Vec::new();
    let mut counts: Vec<String> = Vec::new();
    let mut checks: Vec<String> = Vec::new();
    let mut fmt: Option<String> = None;
    let mut content = false;
    let mut vars = false;
    let mut json = false;
    let mut timeout: Option<u64> = None;
    let mut indent: Option<usize> = None;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--root" | "-d" => root = Some(take_value(args, &mut i, flag)?.to_owned()),
            "--at" => {
                for spec in take_value(args, &mut i, flag)?.split_whitespace() {
                    cursors.push(spec.to_owned());
                }
            }
            "--count" => counts.push(take_value(args, &mut i, flag)?.to_owned()),
            "--check" => checks.push(take_value(args, &mut i, flag)?.to_owned()),
            "--fmt" => fmt = Some(take_value(args, &mut i, flag)?.to_owned()),
            "--indent" => indent = Some(parse_int(flag, take_value(args, &mut i, flag)?)?),
            "--timeout" => timeout = Some(parse_int(flag, take_value(args, &mut i, flag)?)?),
            "--content" => content = true,
            "--vars" => vars = true,
            "--json" => json = true,
            "--help" | "-h" | "-?" => return Ok(CliAction::Help),
            "--version" | "-V" => return Ok(CliAction::Version),
            other => return Err(CliError::UnknownOption(other.to_owned())),
        }
        i += 1;
    }

    let mut modes = Vec::new();
    if !cursors.is_empty() { modes.push("--at"); }
    if !counts.is_empty() { modes.push("--count"); }
    if !checks.is_empty() { modes.push("--check"); }
    if fmt.is_some() { modes.push("--fmt"); }
    if modes.len() > 1 {
        return Err(CliError::ConflictingModes(modes.join(" and ")));
    }

    let mode = if !cursors.is_empty() {
        Mode::Blocks(cursors)
    } else if !counts.is_empty() {
        Mode::Count(counts)
    } else if !checks.is_empty() {
        Mode::Check(checks)
    } else if let Some(path) = fmt {
        Mode::Format(path)
    } else {
        return Err(CliError::NoMode);
    };

    let format = match indent {
        Some(n) => FormatOptions::new(n)?,
        None => FormatOptions::default(),
    };

    let root = root.unwrap_or_else(|| std::env::current_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| ".".into()));

    Ok(CliAction::Run(CliArgs {
        root,
        mode,
        content,
        vars,
        json,
        timeout,
        format,
    }))
}

pub fn print_help() {
    print!(
r#"jlblock — block boundaries and assignments in Julia source

Usage:
  jlblock [options]

Modes (exactly one):
  --at "<specs>"          Find the block around each cursor, specs are "file:line ..."
  --count <path>          Count assignments in a file (repeatable)
  --check <path>          Check that every block opener has a matching end (repeatable)
  --fmt <path>            Print the file reindented by block depth

Options:
  --root, -d <path>       Base directory for relative paths (default: current directory)
  --content               With --at, include the text of each block
  --vars                  With --count, list assigned variable names
  --indent <n>            Indent width for --fmt, 1 to 16 (default: 4)
  --json                  Emit JSON instead of YAML
  --timeout <secs>        Max execution time in seconds
  --help, -h              Show this help
  --version, -V           Show version

Line numbers in specs and output are 1-based.
Set RUST_LOG=debug to trace block resolution on stderr.

Examples:
  jlblock --at "src/Geometry.jl:12"                 Block around line 12
  jlblock --at "a.jl:3 b.jl:40" --content           Several cursors, with block text
  jlblock --count src/Geometry.jl --vars            Assignments and names
  jlblock --check src/Geometry.jl --json            Balance check as JSON
  jlblock --fmt src/Geometry.jl --indent 2          Reindent with two spaces
"#);
}
