//! Shared utility functions.
//!
//! This module contains reusable utilities used across the codebase:
//! - `filetype`: payload signature detection
//! - `url`: reference-cell sanitation

mod filetype;
mod url;

pub use filetype::{detect, FileKind};
pub use url::sanitize_reference;
