//! Purpose: Pull the rendered SVG map out of a JSON stat response and write it to disk.
//! Exports: `Target`, `Extraction`, `read_document`, `find_target`, `write_artifact`, `extract`.
//! Role: The whole read -> decode -> scan -> write pipeline behind the CLI.
//! Invariants: The first element with a `map` key wins; later elements are never consulted.
//! Invariants: Non-object elements are skipped, never rejected.
//! Invariants: Nothing is written unless a string artifact was found.
//! Invariants: The artifact is written byte-for-byte with no trailing newline.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::json::parse;
use crate::output_path::{OutputPathError, derive_output_path};

const MAP_KEY: &str = "map";
const REQUEST_ID_KEY: &str = "request_id";

/// The selected document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
    pub index: usize,
    pub request_id: Option<i64>,
    pub svg: &'a str,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub output: PathBuf,
    pub bytes_written: u64,
    pub index: usize,
    pub request_id: Option<i64>,
}

pub fn read_document(path: &Path) -> Result<Vec<Value>, Error> {
    let text = fs::read_to_string(path).map_err(|err| read_error(path, err))?;
    debug!(path = %path.display(), bytes = text.len(), "read input document");

    let value: Value = parse::from_str(&text).map_err(|err| {
        let hint = parse::hint_for_error(&err, "input document");
        Error::new(ErrorKind::InvalidJson)
            .with_message(format!("file {} is not valid JSON", path.display()))
            .with_hint(hint)
            .with_path(path)
            .with_source(err)
    })?;

    match value {
        Value::Array(items) => {
            debug!(elements = items.len(), "decoded top-level array");
            Ok(items)
        }
        other => Err(Error::new(ErrorKind::InvalidJson)
            .with_message(format!(
                "expected a top-level array, found {}",
                json_type_name(&other)
            ))
            .with_hint("The input must be a JSON array of response objects.")
            .with_path(path)),
    }
}

pub fn find_target(items: &[Value]) -> Result<Target<'_>, Error> {
    let Some((index, object)) = items.iter().enumerate().find_map(|(index, item)| {
        item.as_object()
            .filter(|object| object.contains_key(MAP_KEY))
            .map(|object| (index, object))
    }) else {
        return Err(Error::new(ErrorKind::FieldNotFound)
            .with_message("no object with a \"map\" field was found")
            .with_hint("Check that the stat requests include a `Map` request."));
    };

    let request_id = object.get(REQUEST_ID_KEY).and_then(Value::as_i64);
    match &object[MAP_KEY] {
        Value::String(svg) => {
            debug!(index, ?request_id, bytes = svg.len(), "selected map object");
            Ok(Target {
                index,
                request_id,
                svg,
            })
        }
        other => Err(Error::new(ErrorKind::InvalidMap)
            .with_message(format!(
                "\"map\" field must be a string, found {}",
                json_type_name(other)
            ))
            .with_index(index)),
    }
}

pub fn write_artifact(path: &Path, svg: &str) -> Result<u64, Error> {
    fs::write(path, svg.as_bytes()).map_err(|err| {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::Io,
        };
        Error::new(kind)
            .with_message(format!("failed to write {}", path.display()))
            .with_path(path)
            .with_source(err)
    })?;
    debug!(path = %path.display(), bytes = svg.len(), "wrote artifact");
    Ok(svg.len() as u64)
}

/// Runs the full pipeline; `output` overrides the path derived from `input`.
pub fn extract(input: &Path, output: Option<&Path>) -> Result<Extraction, Error> {
    let items = read_document(input)?;
    let target = find_target(&items).map_err(|err| err.with_path(input))?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => derive_output_path(input).map_err(|err| output_path_error(input, err))?,
    };
    let bytes_written = write_artifact(&output, target.svg)?;

    Ok(Extraction {
        output,
        bytes_written,
        index: target.index,
        request_id: target.request_id,
    })
}

fn read_error(path: &Path, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound => Error::new(ErrorKind::NotFound)
            .with_message(format!("file {} not found", path.display()))
            .with_path(path)
            .with_source(err),
        io::ErrorKind::InvalidData => Error::new(ErrorKind::InvalidJson)
            .with_message(format!("file {} is not valid UTF-8", path.display()))
            .with_path(path)
            .with_source(err),
        _ => Error::new(ErrorKind::Io)
            .with_message(format!("failed to read {}", path.display()))
            .with_hint("I/O error. Check the path and file permissions.")
            .with_path(path)
            .with_source(err),
    }
}

fn output_path_error(input: &Path, err: OutputPathError) -> Error {
    let message = match err {
        OutputPathError::MissingJsonMarker => "input path does not contain \".json\"",
    };
    Error::new(ErrorKind::Usage)
        .with_message(message)
        .with_hint("Rename the input to end in .json, or pass --output explicitly.")
        .with_path(input)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
