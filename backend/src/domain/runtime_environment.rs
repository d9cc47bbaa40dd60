//! Runtime environment name and the seeding it implies.

use std::fmt;

/// Seeding applied on first run for an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Every seed category.
    Full,
    /// Statuses only.
    StatusesOnly,
    /// No seeding.
    Skip,
}

/// Name of the environment the process runs in, e.g. `test`.
///
/// The name also scopes the first-run flag, so each environment initializes
/// once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuntimeEnvironment(String);

impl RuntimeEnvironment {
    /// Wrap an environment name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Environment name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Seeding implied by the environment name.
    ///
    /// # Examples
    ///
    /// ```
    /// use userstory_backend::domain::{RuntimeEnvironment, SeedMode};
    ///
    /// assert_eq!(RuntimeEnvironment::new("test").seed_mode(), SeedMode::Full);
    /// assert_eq!(RuntimeEnvironment::new("production").seed_mode(), SeedMode::Skip);
    /// ```
    pub fn seed_mode(&self) -> SeedMode {
        match self.0.as_str() {
            "test" => SeedMode::Full,
            "development" => SeedMode::StatusesOnly,
            _ => SeedMode::Skip,
        }
    }
}

impl fmt::Display for RuntimeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
