//! Purpose: Crate-wide error type for the extraction pipeline.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: Carries the failure kind plus optional context (message, hint, path, index).
//! Invariants: Every failure the CLI reports is an `Error`; no panics on bad input.
//! Invariants: Exit code is derived from the kind alone.
use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Usage,
    NotFound,
    InvalidJson,
    FieldNotFound,
    InvalidMap,
    Io,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    path: Option<PathBuf>,
    index: Option<usize>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            path: None,
            index: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Array index of the document element the error refers to.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {index})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

/// Every failure exits with 1; callers only distinguish success from failure.
pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Usage
        | ErrorKind::NotFound
        | ErrorKind::InvalidJson
        | ErrorKind::FieldNotFound
        | ErrorKind::InvalidMap
        | ErrorKind::Io => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};
    use std::error::Error as StdError;
    use std::io;

    #[test]
    fn every_failure_kind_exits_with_one() {
        let kinds = [
            ErrorKind::Usage,
            ErrorKind::NotFound,
            ErrorKind::InvalidJson,
            ErrorKind::FieldNotFound,
            ErrorKind::InvalidMap,
            ErrorKind::Io,
        ];

        for kind in kinds {
            assert_eq!(to_exit_code(kind), 1);
        }
    }

    #[test]
    fn display_includes_context() {
        let err = Error::new(ErrorKind::InvalidMap)
            .with_message("map is not a string")
            .with_path("stat.json")
            .with_index(2);
        assert_eq!(
            err.to_string(),
            "InvalidMap: map is not a string (path: stat.json) (index: 2)"
        );
    }

    #[test]
    fn source_is_exposed() {
        let err = Error::new(ErrorKind::Io)
            .with_source(io::Error::other("disk full"));
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "disk full");
        assert!(err.hint().is_none());
    }
}
