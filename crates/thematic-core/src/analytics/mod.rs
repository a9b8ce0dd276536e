//! Analytics Derivation
//!
//! Summaries computed from a finished partition, each independent of the
//! others and of any rendering:
//! - [`ThemeCounts`] and [`code_frequencies`] for bar charts and word clouds
//! - [`project_2d`] for scatter plots
//! - [`SimilarityMatrix`] to flag themes that are not distinct

mod counts;
mod projection;
mod similarity;

pub use counts::{ThemeCounts, code_frequencies};
pub use projection::{Projection, project_2d};
pub use similarity::{SimilarityMatrix, ThemeOverlap};
