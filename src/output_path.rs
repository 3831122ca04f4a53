//! Purpose: Derive the SVG output path from the JSON input path.
//! Exports: `derive_output_path`, `OutputPathError`.
//! Role: Keep the naming rule in one place for the CLI and library callers.
//! Invariants: Only the first `.json` occurrence is replaced, wherever it appears.
//! Invariants: A path without `.json` is rejected rather than mapped onto itself.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

const INPUT_MARKER: &[u8] = b".json";
const OUTPUT_MARKER: &[u8] = b".svg";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputPathError {
    MissingJsonMarker,
}

pub fn derive_output_path(input: &Path) -> Result<PathBuf, OutputPathError> {
    let bytes = input.as_os_str().as_encoded_bytes();
    let start = bytes
        .windows(INPUT_MARKER.len())
        .position(|window| window == INPUT_MARKER)
        .ok_or(OutputPathError::MissingJsonMarker)?;

    let mut out = Vec::with_capacity(bytes.len());
    out.extend_from_slice(&bytes[..start]);
    out.extend_from_slice(OUTPUT_MARKER);
    out.extend_from_slice(&bytes[start + INPUT_MARKER.len()..]);
    // SAFETY: the input is split on an ASCII marker and joined with ASCII bytes,
    // so every piece is a valid encoded-bytes boundary for the platform.
    let out = unsafe { OsString::from_encoded_bytes_unchecked(out) };
    Ok(PathBuf::from(out))
}
