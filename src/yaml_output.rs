use std::io::{self, BufWriter, Write};

use crate::models::{BlockEntry, CheckEntry, CountEntry, MetaInfo, OutputEnvelope};

#[derive(Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

pub fn write_output(envelope: &OutputEnvelope, format: OutputFormat) {
    let stdout = io::stdout();
    let mut w = BufWriter::with_capacity(64 * 1024, stdout.lock());
    match format {
        OutputFormat::Yaml => { write_envelope_yaml(&mut w, envelope).ok(); }
        OutputFormat::Json => { write_envelope_json(&mut w, envelope).ok(); }
    }
    w.flush().ok();
}

pub fn write_text(text: &str) {
    let stdout = io::stdout();
    let mut w = BufWriter::with_capacity(64 * 1024, stdout.lock());
    w.write_all(text.as_bytes()).ok();
    if !text.is_empty() && !text.ends_with('\n') {
        w.write_all(b"\n").ok();
    }
    w.flush().ok();
}

// ── YAML output ──

fn write_envelope_yaml(w: &mut impl Write, envelope: &OutputEnvelope) -> io::Result<()> {
    if let Some(ref meta) = envelope.meta {
        write_meta(w, meta)?;
    }
    if let Some(ref error) = envelope.error {
        write_scalar(w, "error", error, 0)?;
    }
    if let Some(ref blocks) = envelope.blocks {
        write_blocks(w, blocks)?;
    }
    if let Some(ref counts) = envelope.counts {
        write_counts(w, counts)?;
    }
    if let Some(ref checks) = envelope.checks {
        write_checks(w, checks)?;
    }
    Ok(())
}

fn write_meta(w: &mut impl Write, meta: &MetaInfo) -> io::Result<()> {
    write!(w, "meta:\n")?;
    if meta.elapsed_ms != 0 {
        write!(w, "  elapsedMs: {}\n", meta.elapsed_ms)?;
    }
    if meta.timeout {
        write!(w, "  timeout: true\n")?;
    }
    if meta.files_read != 0 {
        write!(w, "  filesRead: {}\n", meta.files_read)?;
    }
    if let Some(total) = meta.total_assignments {
        write!(w, "  totalAssignments: {}\n", total)?;
    }
    Ok(())
}

fn write_blocks(w: &mut impl Write, blocks: &[BlockEntry]) -> io::Result<()> {
    write!(w, "blocks:\n")?;
    for block in blocks {
        write!(w, "- path: ")?;
        write_inline_string(w, &block.path)?;
        write!(w, "\n")?;
        write!(w, "  line: {}\n", block.line)?;
        write!(w, "  found: {}\n", block.found)?;

        if let Some(ref error) = block.error {
            write_scalar(w, "error", error, 2)?;
        }
        if !block.found {
            continue;
        }

        if let Some(kind) = block.kind {
            write!(w, "  kind: {}\n", kind)?;
        }
        write!(w, "  startLine: {}\n", block.start_line)?;
        write!(w, "  endLine: {}\n", block.end_line)?;
        if let Some(ref content) = block.content {
            write_block_scalar(w, "content", content, 2)?;
        }
    }
    Ok(())
}

fn write_counts(w: &mut impl Write, counts: &[CountEntry]) -> io::Result<()> {
    write!(w, "counts:\n")?;
    for entry in counts {
        write!(w, "- path: ")?;
        write_inline_string(w, &entry.path)?;
        write!(w, "\n")?;

        if let Some(ref error) = entry.error {
            write_scalar(w, "error", error, 2)?;
            continue;
        }

        write!(w, "  assignments: {}\n", entry.assignments)?;
        if let Some(ref vars) = entry.variables {
            if vars.is_empty() {
                write!(w, "  variables: []\n")?;
            } else {
                write!(w, "  variables:\n")?;
                for var in vars {
                    write!(w, "  - name: ")?;
                    write_inline_string(w, &var.name)?;
                    write!(w, "\n    line: {}\n", var.line)?;
                }
            }
        }
    }
    Ok(())
}

fn write_checks(w: &mut impl Write, checks: &[CheckEntry]) -> io::Result<()> {
    write!(w, "checks:\n")?;
    for entry in checks {
        write!(w, "- path: ")?;
        write_inline_string(w, &entry.path)?;
        write!(w, "\n")?;

        if let Some(ref error) = entry.error {
            write_scalar(w, "error", error, 2)?;
            continue;
        }

        write!(w, "  valid: {}\n", entry.valid)?;
        if !entry.issues.is_empty() {
            write!(w, "  issues:\n")?;
            for issue in &entry.issues {
                write!(w, "  - line: {}\n", issue.line)?;
                write_scalar(w, "message", &issue.message, 4)?;
            }
        }
    }
    Ok(())
}

fn write_block_scalar(w: &mut impl Write, key: &str, content: &str, indent: usize) -> io::Result<()> {
    write_indent(w, indent)?;
    // `|2` pins the indentation so leading spaces in the first line survive.
    write!(w, "{}: |2\n", key)?;
    for line in content.lines() {
        if line.is_empty() {
            write!(w, "\n")?;
        } else {
            write_indent(w, indent + 2)?;
            write!(w, "{}\n", line)?;
        }
    }
    Ok(())
}

fn write_scalar(w: &mut impl Write, key: &str, value: &str, indent: usize) -> io::Result<()> {
    write_indent(w, indent)?;
    write!(w, "{}: ", key)?;
    write_inline_string(w, value)?;
    write!(w, "\n")?;
    Ok(())
}

fn write_inline_string(w: &mut impl Write, value: &str) -> io::Result<()> {
    if value.is_empty() {
        return write!(w, "''");
    }

    if needs_quoting(value) {
        write!(w, "\"")?;
        for c in value.chars() {
            match c {
                '"' => write!(w, "\\\"")?,
                '\\' => write!(w, "\\\\")?,
                '\n' => write!(w, "\\n")?,
                '\r' => write!(w, "\\r")?,
                '\t' => write!(w, "\\t")?,
                _ => write!(w, "{}", c)?,
            }
        }
        write!(w, "\"")?;
    } else {
        write!(w, "{}", value)?;
    }
    Ok(())
}

fn needs_quoting(value: &str) -> bool {
    let Some(&first) = value.as_bytes().first() else {
        return true;
    };

    if matches!(first, b'-' | b'[' | b']' | b'{' | b'}' | b'\'' | b'"' |
        b'!' | b'&' | b'*' | b'|' | b'>' | b'%' | b'@' | b'`' | b',' | b'?' | b'#' | b' ') {
        return true;
    }

    match value {
        "true" | "false" | "null" | "True" | "False" | "Null" |
        "TRUE" | "FALSE" | "NULL" | "yes" | "no" | "Yes" | "No" |
        "YES" | "NO" | "on" | "off" | "On" | "Off" | "ON" | "OFF" => return true,
        _ => {}
    }

    if looks_numeric(value) {
        return true;
    }

    value.ends_with(' ') || value.chars().any(|c| matches!(c, ':' | '#' | '\n' | '\r' | '\t'))
}

fn looks_numeric(value: &str) -> bool {
    let bytes = value.as_bytes();
    let rest = match bytes.first() {
        Some(b'-') | Some(b'+') => &bytes[1..],
        _ => bytes,
    };
    if rest.is_empty() {
        return false;
    }
    let mut has_dot = false;
    for &b in rest {
        match b {
            b'0'..=b'9' => {}
            b'.' if !has_dot => has_dot = true,
            _ => return false,
        }
    }
    true
}

fn write_indent(w: &mut impl Write, n: usize) -> io::Result<()> {
    const SPACES: &[u8; 32] = b"                                ";
    if n <= SPACES.len() {
        w.write_all(&SPACES[..n])
    } else {
        for _ in 0..n {
            w.write_all(b" ")?;
        }
        Ok(())
    }
}

// ── JSON output ──

fn write_envelope_json(w: &mut impl Write, envelope: &OutputEnvelope) -> io::Result<()> {
    write!(w, "{{")?;
    let mut first = true;

    if let Some(ref meta) = envelope.meta {
        json_comma(w, &mut first)?;
        write_meta_json(w, meta)?;
    }
    if let Some(ref error) = envelope.error {
        json_comma(w, &mut first)?;
        write!(w, "\"error\":")?;
        write_json_string(w, error)?;
    }
    if let Some(ref blocks) = envelope.blocks {
        json_comma(w, &mut first)?;
        write_blocks_json(w, blocks)?;
    }
    if let Some(ref counts) = envelope.counts {
        json_comma(w, &mut first)?;
        write_counts_json(w, counts)?;
    }
    if let Some(ref checks) = envelope.checks {
        json_comma(w, &mut first)?;
        write_checks_json(w, checks)?;
    }

    write!(w, "}}\n")
}

fn json_comma(w: &mut impl Write, first: &mut bool) -> io::Result<()> {
    if *first { *first = false; } else { write!(w, ",")?; }
    Ok(())
}

fn write_json_string(w: &mut impl Write, s: &str) -> io::Result<()> {
    write!(w, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(w, "\\\"")?,
            '\\' => write!(w, "\\\\")?,
            '\n' => write!(w, "\\n")?,
            '\r' => write!(w, "\\r")?,
            '\t' => write!(w, "\\t")?,
            c if (c as u32) < 0x20 => write!(w, "\\u{:04x}", c as u32)?,
            _ => write!(w, "{}", c)?,
        }
    }
    write!(w, "\"")
}

fn write_meta_json(w: &mut impl Write, meta: &MetaInfo) -> io::Result<()> {
    write!(w, "\"meta\":{{\"elapsedMs\":{},\"timeout\":{},\"filesRead\":{}",
        meta.elapsed_ms, meta.timeout, meta.files_read)?;
    if let Some(total) = meta.total_assignments {
        write!(w, ",\"totalAssignments\":{}", total)?;
    }
    write!(w, "}}")
}

fn write_blocks_json(w: &mut impl Write, blocks: &[BlockEntry]) -> io::Result<()> {
    write!(w, "\"blocks\":[")?;
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 { write!(w, ",")?; }
        write!(w, "{{\"path\":")?;
        write_json_string(w, &block.path)?;
        write!(w, ",\"line\":{},\"found\":{}", block.line, block.found)?;
        if block.found {
            if let Some(kind) = block.kind {
                write!(w, ",\"kind\":")?;
                write_json_string(w, kind)?;
            }
            write!(w, ",\"startLine\":{},\"endLine\":{}", block.start_line, block.end_line)?;
        }
        if let Some(ref content) = block.content {
            write!(w, ",\"content\":")?;
            write_json_string(w, content)?;
        }
        if let Some(ref error) = block.error {
            write!(w, ",\"error\":")?;
            write_json_string(w, error)?;
        }
        write!(w, "}}")?;
    }
    write!(w, "]")
}

fn write_counts_json(w: &mut impl Write, counts: &[CountEntry]) -> io::Result<()> {
    write!(w, "\"counts\":[")?;
    for (i, entry) in counts.iter().enumerate() {
        if i > 0 { write!(w, ",")?; }
        write!(w, "{{\"path\":")?;
        write_json_string(w, &entry.path)?;
        if let Some(ref error) = entry.error {
            write!(w, ",\"error\":")?;
            write_json_string(w, error)?;
        } else {
            write!(w, ",\"assignments\":{}", entry.assignments)?;
        }
        if let Some(ref vars) = entry.variables {
            write!(w, ",\"variables\":[")?;
            for (j, var) in vars.iter().enumerate() {
                if j > 0 { write!(w, ",")?; }
                write!(w, "{{\"name\":")?;
                write_json_string(w, &var.name)?;
                write!(w, ",\"line\":{}}}", var.line)?;
            }
            write!(w, "]")?;
        }
        write!(w, "}}")?;
    }
    write!(w, "]")
}

fn write_checks_json(w: &mut impl Write, checks: &[CheckEntry]) -> io::Result<()> {
    write!(w, "\"checks\":[")?;
    for (i, entry) in checks.iter().enumerate() {
        if i > 0 { write!(w, ",")?; }
        write!(w, "{{\"path\":")?;
        write_json_string(w, &entry.path)?;
        if let Some(ref error) = entry.error {
            write!(w, ",\"error\":")?;
            write_json_string(w, error)?;
        } else {
            write!(w, ",\"valid\":{},\"issues\":[", entry.valid)?;
            for (j, issue) in entry.issues.iter().enumerate() {
                if j > 0 { write!(w, ",")?; }
                write!(w, "{{\"line\":{},\"message\":", issue.line)?;
                write_json_string(w, &issue.message)?;
                write!(w, "}}")?;
            }
            write!(w, "]")?;
        }
        write!(w, "}}")?;
    }
    write!(w, "]")
}
