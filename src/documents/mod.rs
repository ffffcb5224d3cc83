//! Locating PDFs on disk and pulling their text out

pub mod extract;
pub mod path;

pub use extract::{MIN_EXTRACTED_CHARS, TextExtractor};
pub use path::PathResolver;
