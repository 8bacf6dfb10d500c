//! Shared test utilities and fixtures
//!
//! Builders for smuggled payloads and helpers for driving the `unveil` binary.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use unveil_types::ScanResult;

/// Invisible Times, the zero bit of the sneaky-bits channel.
pub const BIT_ZERO: char = '\u{2062}';
/// Invisible Plus, the one bit of the sneaky-bits channel.
pub const BIT_ONE: char = '\u{2064}';

/// Encode ASCII `text` as tag characters (U+E0000 + byte).
pub fn tags(text: &str) -> String {
    text.bytes()
        .map(|b| char::from_u32(0xE0000 + u32::from(b)).expect("tag code point"))
        .collect()
}

/// Encode `text` as eight sneaky-bit carriers per byte, most significant bit first.
pub fn sneaky_bits(text: &str) -> String {
    text.bytes()
        .flat_map(|b| (0..8).rev().map(move |i| (b >> i) & 1))
        .map(|bit| if bit == 1 { BIT_ONE } else { BIT_ZERO })
        .collect()
}

/// Rebuild the scanned input from its segments.
pub fn reconstruct(input: &str, result: &ScanResult) -> String {
    result
        .segments
        .iter()
        .map(|segment| segment.source(input))
        .collect()
}

/// A `Command` for the `unveil` binary with an isolated configuration.
///
/// `config` is where the binary looks for its config file; it does not need
/// to exist.
pub fn unveil(config: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_unveil"));
    cmd.env("UNVEIL_CONFIG", config).env_remove("RUST_LOG");
    cmd
}

/// Run `cmd` with `stdin` piped in and collect its output.
pub fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn unveil");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for unveil")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is UTF-8")
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
