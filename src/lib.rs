//! Purpose: Library crate backing the `extract-svg` CLI and its tests.
//! Exports: `core` (extraction pipeline, errors), `json` (decode boundary), `output_path`.
//! Role: Keeps the pipeline testable without spawning the binary.
//! Invariants: Library code never prints; reporting belongs to the binary.
pub mod core;
pub mod json;
pub mod output_path;
