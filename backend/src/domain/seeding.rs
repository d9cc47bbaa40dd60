//! First-run seed data insertion.
//!
//! Each category is inserted as one unordered batch of concurrent create
//! calls. Failures are collected per item and never roll back records that
//! were already created.

use std::sync::Arc;

use futures_util::future::join_all;
use seed_data::{SeedCategory, SeedDocument, SeedRecord};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{
    RoleRepository, RoleRepositoryError, SeedRecordRepository, SeedRecordRepositoryError,
};
use crate::domain::{RoleClass, find_role_by_class};

/// Insertion order for a full seed run.
const FULL_SEED_ORDER: [SeedCategory; 5] = [
    SeedCategory::Products,
    SeedCategory::Statuses,
    SeedCategory::UserStories,
    SeedCategory::Comments,
    SeedCategory::Users,
];

/// Reasons a seed record could not be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedInsertError {
    /// The store rejected the record.
    #[error("seed insert failed: {0}")]
    Store(#[from] SeedRecordRepositoryError),
    /// Roles could not be listed while resolving the authenticated role.
    #[error("failed to resolve authenticated role: {0}")]
    RoleLookup(#[from] RoleRepositoryError),
    /// No role of class authenticated exists for seeded users.
    #[error("no authenticated role exists to assign to seeded users")]
    AuthenticatedRoleMissing,
}

/// A record that could not be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInsertFailure {
    /// Position of the record in its seed array, or `None` when the whole
    /// category failed before any insert was attempted.
    pub index: Option<usize>,
    /// Cause of the failure.
    pub error: SeedInsertError,
}

/// Outcome of inserting one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    /// Category that was inserted.
    pub category: SeedCategory,
    /// Number of records created.
    pub created: usize,
    /// Records that failed.
    pub failures: Vec<SeedInsertFailure>,
}

/// Outcome of a seed run, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Per-category results.
    pub categories: Vec<CategoryReport>,
}

impl SeedReport {
    /// Number of records created for `category`.
    pub fn created(&self, category: SeedCategory) -> usize {
        self.categories
            .iter()
            .filter(|report| report.category == category)
            .map(|report| report.created)
            .sum()
    }

    /// Whether every category inserted without failures.
    pub fn is_complete(&self) -> bool {
        self.categories
            .iter()
            .all(|report| report.failures.is_empty())
    }
}

/// Service inserting seed documents through the record store.
#[derive(Clone)]
pub struct SeedDataLoader<S, R> {
    records: Arc<S>,
    roles: Arc<R>,
}

impl<S, R> SeedDataLoader<S, R> {
    /// Create a loader over the given record and role stores.
    pub fn new(records: Arc<S>, roles: Arc<R>) -> Self {
        Self { records, roles }
    }
}

impl<S, R> SeedDataLoader<S, R>
where
    S: SeedRecordRepository,
    R: RoleRepository,
{
    /// Insert every category: products, statuses, stories, comments, then
    /// users.
    ///
    /// Each category is awaited before the next starts. A failing category
    /// does not stop later ones.
    pub async fn seed_all(&self, document: &SeedDocument) -> SeedReport {
        info!(records = document.len(), "inserting seed data");
        let mut report = SeedReport::default();
        for category in FULL_SEED_ORDER {
            let category_report = if category == SeedCategory::Users {
                self.insert_users(document.records(category)).await
            } else {
                self.insert_category(category, document.records(category).to_vec())
                    .await
            };
            report.categories.push(category_report);
        }
        report
    }

    /// Insert only the statuses category.
    pub async fn seed_statuses_only(&self, document: &SeedDocument) -> SeedReport {
        let statuses = document.records(SeedCategory::Statuses).to_vec();
        let category_report = self
            .insert_category(SeedCategory::Statuses, statuses)
            .await;
        SeedReport {
            categories: vec![category_report],
        }
    }

    async fn insert_users(&self, users: &[SeedRecord]) -> CategoryReport {
        match self.authenticated_role_id().await {
            Ok(role_id) => {
                let assigned = users.iter().map(|user| user.with_role(role_id)).collect();
                self.insert_category(SeedCategory::Users, assigned).await
            }
            Err(error) => {
                warn!(
                    category = %SeedCategory::Users,
                    error = %error,
                    "skipping seed users"
                );
                CategoryReport {
                    category: SeedCategory::Users,
                    created: 0,
                    failures: vec![SeedInsertFailure { index: None, error }],
                }
            }
        }
    }

    async fn authenticated_role_id(&self) -> Result<i64, SeedInsertError> {
        let roles = self.roles.list_roles().await?;
        find_role_by_class(&roles, RoleClass::Authenticated)
            .map(|role| role.id.as_i64())
            .ok_or(SeedInsertError::AuthenticatedRoleMissing)
    }

    async fn insert_category(
        &self,
        category: SeedCategory,
        records: Vec<SeedRecord>,
    ) -> CategoryReport {
        let inserts = records.into_iter().enumerate().map(|(index, record)| {
            let store = Arc::clone(&self.records);
            async move { (index, store.create_record(category, record).await) }
        });

        let mut created = 0;
        let mut failures = Vec::new();
        for (index, result) in join_all(inserts).await {
            match result {
                Ok(()) => created += 1,
                Err(error) => {
                    warn!(%category, index, error = %error, "seed insert failed");
                    failures.push(SeedInsertFailure {
                        index: Some(index),
                        error: error.into(),
                    });
                }
            }
        }

        info!(%category, created, failed = failures.len(), "inserted seed records");
        CategoryReport {
            category,
            created,
            failures,
        }
    }
}
