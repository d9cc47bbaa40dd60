//! Error types for the seed-data crate.

use thiserror::Error;

use crate::SeedCategory;

/// Errors raised while parsing a seed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedDataError {
    /// The document is not valid JSON or does not have the expected layout.
    #[error("invalid seed document JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// An entry inside one of the arrays is not a JSON object.
    #[error("seed entry {index} in '{category}' is not a JSON object")]
    NotAnObject {
        /// Category holding the offending entry.
        category: SeedCategory,
        /// Position of the entry within its array.
        index: usize,
    },
}
