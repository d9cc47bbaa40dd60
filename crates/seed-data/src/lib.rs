//! Typed access to the static seed document applied on first run.
//!
//! The seed document is a single JSON object holding five named arrays:
//! `products`, `userStories`, `comments`, `users` and `statuses`. Each entry
//! is an opaque JSON object whose shape is owned by the content types that
//! receive it. This crate only guarantees that every entry is an object and
//! groups the entries by [`SeedCategory`]. It is deliberately independent of
//! backend domain types.
//!
//! # Example
//!
//! ```
//! use seed_data::{SeedCategory, SeedDocument};
//!
//! let json = r#"{
//!     "products": [{"name": "Feedback portal"}],
//!     "statuses": [{"name": "open"}, {"name": "done"}],
//!     "users": [{"username": "ada", "email": "ada@example.com"}]
//! }"#;
//!
//! let document = SeedDocument::from_json(json).expect("valid seed document");
//! assert_eq!(document.records(SeedCategory::Statuses).len(), 2);
//! assert!(document.records(SeedCategory::Comments).is_empty());
//! ```

mod category;
mod document;
mod error;
mod record;

pub use category::SeedCategory;
pub use document::SeedDocument;
pub use error::SeedDataError;
pub use record::SeedRecord;
