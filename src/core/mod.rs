// Core modules implementing extraction and error modeling.
pub mod error;
pub mod extract;
