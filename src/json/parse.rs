//! Purpose: Provide the JSON decode entrypoint and parse-failure diagnostics.
//! Exports: `from_str`, `ParseFailureCategory`, `categorize_error`, `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Category labels are stable; hints never echo document payload.
//! Notes: Error mapping into the crate error type is done by callsites.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    let category = categorize_error(err);
    format!(
        "parse category: {}; line {}, column {}; context: {context}",
        category.label(),
        err.line(),
        err.column()
    )
}
