//! Reading scan inputs from files and stdin.

use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Display name used for standard input.
pub const STDIN_NAME: &str = "-";

/// One text to scan.
#[derive(Debug)]
pub struct Source {
    /// File path as given, or `-` for stdin.
    pub name: String,
    pub text: String,
}

/// Read every path in order. An empty list, or a path of `-`, reads stdin.
///
/// Stdin can only be drained once, so `-` may appear at most once.
pub fn collect(paths: &[PathBuf]) -> Result<Vec<Source>> {
    if paths.is_empty() {
        return Ok(vec![read_stdin()?]);
    }
    let stdin_uses = paths.iter().filter(|path| is_stdin(path)).count();
    if stdin_uses > 1 {
        bail!("stdin (`-`) given {stdin_uses} times; it can be read only once");
    }
    paths
        .iter()
        .map(|path| {
            if is_stdin(path) {
                read_stdin()
            } else {
                read_file(path)
            }
        })
        .collect()
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_NAME
}

fn read_stdin() -> Result<Source> {
    let mut bytes = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .context("failed to read stdin")?;
    Ok(Source {
        name: STDIN_NAME.to_string(),
        text: decode_lossy(STDIN_NAME, bytes),
    })
}

fn read_file(path: &Path) -> Result<Source> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path.display().to_string();
    let text = decode_lossy(&name, bytes);
    Ok(Source { name, text })
}

/// Decode UTF-8, replacing invalid sequences with U+FFFD.
pub fn decode_lossy(name: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                source = name,
                valid_up_to = err.utf8_error().valid_up_to(),
                "input is not valid UTF-8; invalid bytes replaced"
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}
