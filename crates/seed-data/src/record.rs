//! Opaque seed records.

use serde::Serialize;
use serde_json::{Map, Value};

/// Field overwritten on user records with the authenticated role identifier.
const ROLE_FIELD: &str = "role";

/// A single seed entry: a JSON object whose fields belong to the target
/// content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SeedRecord(Map<String, Value>);

impl SeedRecord {
    /// Wrap an existing JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Consume the record, returning its fields.
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Look up a single field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Return a copy of this record whose `role` field is `role_id`.
    ///
    /// Any role already present in the seed entry is replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use seed_data::SeedRecord;
    /// use serde_json::json;
    ///
    /// let fields = json!({"username": "ada", "role": 99});
    /// let serde_json::Value::Object(fields) = fields else { unreachable!() };
    /// let user = SeedRecord::new(fields).with_role(2);
    /// assert_eq!(user.get("role"), Some(&json!(2)));
    /// ```
    #[must_use]
    pub fn with_role(&self, role_id: i64) -> Self {
        let mut fields = self.0.clone();
        fields.insert(ROLE_FIELD.to_owned(), Value::from(role_id));
        Self(fields)
    }

    /// Return the `role` field when it holds an integer.
    #[must_use]
    pub fn role(&self) -> Option<i64> {
        self.0.get(ROLE_FIELD).and_then(Value::as_i64)
    }
}
