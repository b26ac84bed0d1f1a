use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use memmap2::Mmap;

use crate::error::CliError;

pub const MMAP_THRESHOLD: u64 = 64 * 1024;
pub const BINARY_CHECK_SIZE: usize = 8192;

/// Reads a source file as UTF-8 text. Empty files read as an empty string.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    let metadata = std::fs::metadata(path).map_err(|e| CliError::io(path, e))?;
    if metadata.len() == 0 {
        return Ok(String::new());
    }
    if metadata.len() >= MMAP_THRESHOLD {
        read_file_mmap(path)
    } else {
        read_file_buffered(path)
    }
}

fn read_file_mmap(path: &Path) -> Result<String, CliError> {
    let file = File::open(path).map_err(|e| CliError::io(path, e))?;
    // The map is dropped before returning; the text is copied out.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| CliError::io(path, e))?;
    decode(&mmap[..])
}

fn read_file_buffered(path: &Path) -> Result<String, CliError> {
    let file = File::open(path).map_err(|e| CliError::io(path, e))?;
    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut all = Vec::new();
    reader.read_to_end(&mut all).map_err(|e| CliError::io(path, e))?;
    decode(&all)
}

fn decode(data: &[u8]) -> Result<String, CliError> {
    if is_binary(data) {
        return Err(CliError::Binary);
    }
    std::str::from_utf8(data)
        .map(str::to_owned)
        .map_err(|_| CliError::NotUtf8)
}

pub fn is_binary(data: &[u8]) -> bool {
    let check_len = data.len().min(BINARY_CHECK_SIZE);
    data[..check_len].contains(&0)
}
