//! Seed document parsing.

use serde::Deserialize;
use serde_json::Value;

use crate::{SeedCategory, SeedDataError, SeedRecord};

/// The five record groups applied on first run.
///
/// Arrays missing from the JSON are treated as empty so that partial
/// documents (for example a statuses-only fixture) remain valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedDocument {
    products: Vec<SeedRecord>,
    user_stories: Vec<SeedRecord>,
    comments: Vec<SeedRecord>,
    users: Vec<SeedRecord>,
    statuses: Vec<SeedRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDocument {
    #[serde(default)]
    products: Vec<Value>,
    #[serde(default)]
    user_stories: Vec<Value>,
    #[serde(default)]
    comments: Vec<Value>,
    #[serde(default)]
    users: Vec<Value>,
    #[serde(default)]
    statuses: Vec<Value>,
}

impl SeedDocument {
    /// Parses a seed document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SeedDataError::Parse`] when the JSON is malformed or a named
    /// field is not an array, and [`SeedDataError::NotAnObject`] when an
    /// array entry is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, SeedDataError> {
        let raw: RawSeedDocument =
            serde_json::from_str(json).map_err(|e| SeedDataError::Parse {
                message: e.to_string(),
            })?;

        Ok(Self {
            products: into_records(SeedCategory::Products, raw.products)?,
            user_stories: into_records(SeedCategory::UserStories, raw.user_stories)?,
            comments: into_records(SeedCategory::Comments, raw.comments)?,
            users: into_records(SeedCategory::Users, raw.users)?,
            statuses: into_records(SeedCategory::Statuses, raw.statuses)?,
        })
    }

    /// Returns the records held for `category`.
    #[must_use]
    pub fn records(&self, category: SeedCategory) -> &[SeedRecord] {
        match category {
            SeedCategory::Products => &self.products,
            SeedCategory::UserStories => &self.user_stories,
            SeedCategory::Comments => &self.comments,
            SeedCategory::Users => &self.users,
            SeedCategory::Statuses => &self.statuses,
        }
    }

    /// Total number of records across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        SeedCategory::ALL
            .iter()
            .map(|category| self.records(*category).len())
            .sum()
    }

    /// Returns `true` when no category holds any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn into_records(
    category: SeedCategory,
    values: Vec<Value>,
) -> Result<Vec<SeedRecord>, SeedDataError> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(fields) => Ok(SeedRecord::new(fields)),
            _ => Err(SeedDataError::NotAnObject { category, index }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_arrays_default_to_empty() {
        let document = SeedDocument::from_json(r#"{"statuses": [{"name": "open"}]}"#)
            .expect("document should parse");

        assert_eq!(document.records(SeedCategory::Statuses).len(), 1);
        assert!(document.records(SeedCategory::Products).is_empty());
        assert_eq!(document.len(), 1);
    }

    #[rstest]
    fn empty_object_is_an_empty_document() {
        let document = SeedDocument::from_json("{}").expect("document should parse");

        assert!(document.is_empty());
    }

    #[rstest]
    #[case::scalar_entry(r#"{"comments": [{"body": "hi"}, 42]}"#, SeedCategory::Comments, 1)]
    #[case::array_entry(r#"{"userStories": [[]]}"#, SeedCategory::UserStories, 0)]
    fn non_object_entries_are_rejected(
        #[case] json: &str,
        #[case] category: SeedCategory,
        #[case] index: usize,
    ) {
        let error = SeedDocument::from_json(json).expect_err("entry should be rejected");

        assert_eq!(error, SeedDataError::NotAnObject { category, index });
    }

    #[rstest]
    #[case::not_json("products: []")]
    #[case::field_not_array(r#"{"users": {"username": "ada"}}"#)]
    fn malformed_documents_are_parse_errors(#[case] json: &str) {
        let error = SeedDocument::from_json(json).expect_err("document should be rejected");

        assert!(matches!(error, SeedDataError::Parse { .. }));
    }
}
