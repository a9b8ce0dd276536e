//! Input normalization and validation
//!
//! Everything the clustering pass consumes passes through here first:
//! codes are trimmed/lowercased and theme definitions are validated.

mod codes;
mod themes;

pub use codes::{collect_codes, normalize_text, split_codewords, unique_codes};
pub use themes::{ThemeSet, ThemeSpec};
