//! Seed categories and the content types they are written to.

use std::fmt;

/// One of the five record groups carried by a seed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedCategory {
    /// Products that user stories belong to.
    Products,
    /// User stories.
    UserStories,
    /// Comments attached to user stories.
    Comments,
    /// Workflow statuses for user stories.
    Statuses,
    /// End-user accounts.
    Users,
}

impl SeedCategory {
    /// Every category, in document order.
    pub const ALL: [Self; 5] = [
        Self::Products,
        Self::UserStories,
        Self::Comments,
        Self::Users,
        Self::Statuses,
    ];

    /// Name of the array holding this category in the seed document.
    #[must_use]
    pub const fn document_key(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::UserStories => "userStories",
            Self::Comments => "comments",
            Self::Statuses => "statuses",
            Self::Users => "users",
        }
    }

    /// Content type that records of this category are created as.
    ///
    /// # Examples
    ///
    /// ```
    /// use seed_data::SeedCategory;
    ///
    /// assert_eq!(SeedCategory::Comments.resource_name(), "user-story-comment");
    /// ```
    #[must_use]
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::Products => "product",
            Self::UserStories => "user-story",
            Self::Comments => "user-story-comment",
            Self::Statuses => "user-story-status",
            Self::Users => "user",
        }
    }
}

impl fmt::Display for SeedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_name())
    }
}
