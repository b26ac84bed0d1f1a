mod check;
mod cli;
mod count;
mod cursors;
mod error;
mod file_reader;
mod models;
mod path_helper;
mod yaml_output;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use error::CliError;
use models::{MetaInfo, OutputEnvelope};
use yaml_output::OutputFormat;

const TIMEOUT_MESSAGE: &str = "Operation timed out — partial results may be incomplete";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let action = match cli::parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    match action {
        cli::CliAction::Help => {
            cli::print_help();
            0
        }
        cli::CliAction::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            0
        }
        cli::CliAction::Run(args) => execute(args),
    }
}

fn execute(args: cli::CliArgs) -> i32 {
    let format = if args.json { OutputFormat::Json } else { OutputFormat::Yaml };
    let root = Path::new(&args.root);
    if !root.is_dir() {
        yaml_output::write_output(&OutputEnvelope::from_error(CliError::RootNotFound(args.root.clone())), format);
        return 1;
    }

    let cancelled = Arc::new(AtomicBool::new(false));
    ctrlc_handler(&cancelled);

    if let Some(secs) = args.timeout {
        let cancelled = cancelled.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_secs(secs));
            log::warn!("timeout of {}s reached, cancelling", secs);
            cancelled.store(true, Ordering::Relaxed);
        });
    }

    let start = Instant::now();

    match &args.mode {
        cli::Mode::Blocks(raw) => execute_blocks(&args, raw, root, format, &cancelled, start),
        cli::Mode::Count(paths) => execute_count(&args, paths, root, format, &cancelled, start),
        cli::Mode::Check(paths) => execute_check(paths, root, format, &cancelled, start),
        cli::Mode::Format(path) => execute_format(&args, path, root, format),
    }
}

fn finish(envelope: &OutputEnvelope, format: OutputFormat, timed_out: bool, failed: bool) -> i32 {
    yaml_output::write_output(envelope, format);
    if timed_out {
        2
    } else if failed {
        1
    } else {
        0
    }
}

fn execute_blocks(
    args: &cli::CliArgs,
    raw: &[String],
    root: &Path,
    format: OutputFormat,
    cancelled: &AtomicBool,
    start: Instant,
) -> i32 {
    let specs = match cursors::parse_cursor_specs(raw, root) {
        Ok(s) => s,
        Err(e) => return finish(&OutputEnvelope::from_error(e), format, false, true),
    };

    let (entries, files_read) = cursors::resolve_cursors(&specs, root, args.content, cancelled);
    let timed_out = cancelled.load(Ordering::Relaxed);

    let envelope = OutputEnvelope {
        meta: Some(MetaInfo {
            elapsed_ms: start.elapsed().as_millis(),
            timeout: timed_out,
            files_read,
            total_assignments: None,
        }),
        blocks: Some(entries),
        error: timed_out.then(|| TIMEOUT_MESSAGE.into()),
        ..Default::default()
    };
    finish(&envelope, format, timed_out, false)
}

fn execute_count(
    args: &cli::CliArgs,
    paths: &[String],
    root: &Path,
    format: OutputFormat,
    cancelled: &AtomicBool,
    start: Instant,
) -> i32 {
    let (entries, total) = count::count_files(paths, root, args.vars, cancelled);
    let timed_out = cancelled.load(Ordering::Relaxed);

    let envelope = OutputEnvelope {
        meta: Some(MetaInfo {
            elapsed_ms: start.elapsed().as_millis(),
            timeout: timed_out,
            files_read: entries.iter().filter(|e| e.error.is_none()).count(),
            total_assignments: Some(total),
        }),
        counts: Some(entries),
        error: timed_out.then(|| TIMEOUT_MESSAGE.into()),
        ..Default::default()
    };
    finish(&envelope, format, timed_out, false)
}

fn execute_check(
    paths: &[String],
    root: &Path,
    format: OutputFormat,
    cancelled: &AtomicBool,
    start: Instant,
) -> i32 {
    let entries = check::check_files(paths, root, cancelled);
    let timed_out = cancelled.load(Ordering::Relaxed);
    let failed = entries.iter().any(|e| !e.valid);

    let envelope = OutputEnvelope {
        meta: Some(MetaInfo {
            elapsed_ms: start.elapsed().as_millis(),
            timeout: timed_out,
            files_read: entries.iter().filter(|e| e.error.is_none()).count(),
            total_assignments: None,
        }),
        checks: Some(entries),
        error: timed_out.then(|| TIMEOUT_MESSAGE.into()),
        ..Default::default()
    };
    finish(&envelope, format, timed_out, failed)
}

fn execute_format(args: &cli::CliArgs, path: &str, root: &Path, format: OutputFormat) -> i32 {
    let (full, _) = path_helper::resolve(root, path);
    match file_reader::read_file(&full) {
        Ok(content) => {
            yaml_output::write_text(&jlblock::format_code(&content, &args.format));
            0
        }
        Err(e) => finish(&OutputEnvelope::from_error(e), format, false, true),
    }
}

#[cfg(unix)]
fn ctrlc_handler(cancelled: &Arc<AtomicBool>) {
    if let Err(e) = signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(cancelled)) {
        log::warn!("could not install SIGINT handler: {}", e);
    }
}

#[cfg(not(unix))]
fn ctrlc_handler(_cancelled: &Arc<AtomicBool>) {}
