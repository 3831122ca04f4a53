//! Purpose: JSON parsing boundary shared by the extractor and tests.
//! Exports: `parse` module with decode and diagnostic helpers.
//! Role: Single seam for parser usage so callsites avoid ad hoc decode logic.
//! Invariants: Document decoding goes through this module.

pub mod parse;
