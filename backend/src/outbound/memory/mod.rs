//! In-memory implementation of every bootstrap port.
//!
//! Used by integration tests and local dry runs. All state sits behind one
//! mutex, which also makes [`SetupStore::claim_flag`] atomic. Failure
//! injection hooks let tests exercise the partial-failure paths.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use seed_data::{SeedCategory, SeedRecord};

use crate::domain::ports::{
    FlagClaim, PermissionRepository, PermissionRepositoryError, RoleRepository,
    RoleRepositoryError, SeedRecordRepository, SeedRecordRepositoryError, SetupFlagKey,
    SetupStore, SetupStoreError,
};
use crate::domain::{PermissionId, PermissionRecord, Role};

#[derive(Debug, Default)]
struct MemoryState {
    flags: HashMap<SetupFlagKey, bool>,
    roles: Vec<Role>,
    records: HashMap<SeedCategory, Vec<SeedRecord>>,
    permission_updates: usize,
    store_unavailable: bool,
    failing_permissions: HashSet<PermissionId>,
    failing_categories: HashSet<SeedCategory>,
}

impl MemoryState {
    fn permission_mut(&mut self, id: PermissionId) -> Option<&mut PermissionRecord> {
        self.roles
            .iter_mut()
            .flat_map(|role| role.permissions.iter_mut())
            .find(|permission| permission.id == id)
    }
}

/// Shared in-memory store. Clones observe the same state.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBootstrapStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryBootstrapStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `roles` and their permission records.
    pub fn with_roles(roles: Vec<Role>) -> Self {
        let store = Self::new();
        store.lock().roles = roles;
        store
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every stored permission record.
    pub fn permissions(&self) -> Vec<PermissionRecord> {
        self.lock()
            .roles
            .iter()
            .flat_map(|role| role.permissions.iter().cloned())
            .collect()
    }

    /// Snapshot of one permission record.
    pub fn permission(&self, id: PermissionId) -> Option<PermissionRecord> {
        self.lock().permission_mut(id).cloned()
    }

    /// Number of permission updates accepted so far.
    pub fn permission_updates(&self) -> usize {
        self.lock().permission_updates
    }

    /// Records created for `category`, in insertion order.
    pub fn records(&self, category: SeedCategory) -> Vec<SeedRecord> {
        self.lock()
            .records
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of created seed records.
    pub fn record_count(&self) -> usize {
        self.lock().records.values().map(Vec::len).sum()
    }

    /// Current value of a flag, bypassing the port.
    pub fn flag(&self, key: &SetupFlagKey) -> Option<bool> {
        self.lock().flags.get(key).copied()
    }

    /// Make every setup store call fail while `unavailable` is true.
    pub fn set_store_unavailable(&self, unavailable: bool) {
        self.lock().store_unavailable = unavailable;
    }

    /// Make updates of `id` fail.
    pub fn fail_permission_update(&self, id: PermissionId) {
        self.lock().failing_permissions.insert(id);
    }

    /// Make inserts into `category` fail.
    pub fn fail_category(&self, category: SeedCategory) {
        self.lock().failing_categories.insert(category);
    }
}

#[async_trait]
impl SetupStore for InMemoryBootstrapStore {
    async fn get_flag(&self, key: &SetupFlagKey) -> Result<Option<bool>, SetupStoreError> {
        let state = self.lock();
        if state.store_unavailable {
            return Err(SetupStoreError::connection("in-memory store unavailable"));
        }
        Ok(state.flags.get(key).copied())
    }

    async fn set_flag(&self, key: &SetupFlagKey, value: bool) -> Result<(), SetupStoreError> {
        let mut state = self.lock();
        if state.store_unavailable {
            return Err(SetupStoreError::connection("in-memory store unavailable"));
        }
        state.flags.insert(key.clone(), value);
        Ok(())
    }

    async fn claim_flag(&self, key: &SetupFlagKey) -> Result<FlagClaim, SetupStoreError> {
        let mut state = self.lock();
        if state.store_unavailable {
            return Err(SetupStoreError::connection("in-memory store unavailable"));
        }
        let previous = state.flags.insert(key.clone(), true);
        if previous == Some(true) {
            Ok(FlagClaim::AlreadySet)
        } else {
            Ok(FlagClaim::Claimed)
        }
    }
}

#[async_trait]
impl RoleRepository for InMemoryBootstrapStore {
    async fn list_roles(&self) -> Result<Vec<Role>, RoleRepositoryError> {
        Ok(self.lock().roles.clone())
    }
}

#[async_trait]
impl PermissionRepository for InMemoryBootstrapStore {
    async fn set_enabled(
        &self,
        id: PermissionId,
        enabled: bool,
    ) -> Result<(), PermissionRepositoryError> {
        let mut state = self.lock();
        if state.failing_permissions.contains(&id) {
            return Err(PermissionRepositoryError::query(format!(
                "update of permission {id} rejected"
            )));
        }
        let permission = state
            .permission_mut(id)
            .ok_or_else(|| PermissionRepositoryError::not_found(id.as_i64()))?;
        permission.enabled = enabled;
        state.permission_updates += 1;
        Ok(())
    }
}

#[async_trait]
impl SeedRecordRepository for InMemoryBootstrapStore {
    async fn create_record(
        &self,
        category: SeedCategory,
        record: SeedRecord,
    ) -> Result<(), SeedRecordRepositoryError> {
        let mut state = self.lock();
        if state.failing_categories.contains(&category) {
            return Err(SeedRecordRepositoryError::query(format!(
                "insert into {category} rejected"
            )));
        }
        state.records.entry(category).or_default().push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the in-memory adapter.

    use super::*;
    use crate::domain::ports::SETUP_NAMESPACE;
    use crate::domain::{RoleClass, RoleId};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn claim_is_single_use_until_reset() {
        let store = InMemoryBootstrapStore::new();
        let key = SetupFlagKey::init_has_run("test", SETUP_NAMESPACE);

        assert_eq!(store.claim_flag(&key).await, Ok(FlagClaim::Claimed));
        assert_eq!(store.claim_flag(&key).await, Ok(FlagClaim::AlreadySet));

        store.set_flag(&key, false).await.expect("reset flag");
        assert_eq!(store.claim_flag(&key).await, Ok(FlagClaim::Claimed));
    }

    #[rstest]
    #[tokio::test]
    async fn claims_are_scoped_by_environment() {
        let store = InMemoryBootstrapStore::new();
        let test = SetupFlagKey::init_has_run("test", SETUP_NAMESPACE);
        let development = SetupFlagKey::init_has_run("development", SETUP_NAMESPACE);

        assert_eq!(store.claim_flag(&test).await, Ok(FlagClaim::Claimed));
        assert_eq!(store.claim_flag(&development).await, Ok(FlagClaim::Claimed));
        assert_eq!(store.flag(&test), Some(true));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_permission_update_is_not_found() {
        let store = InMemoryBootstrapStore::with_roles(vec![Role::new(
            RoleId::new(1),
            "Public",
            RoleClass::Public.as_str(),
        )]);

        let error = store
            .set_enabled(PermissionId::new(404), true)
            .await
            .expect_err("record does not exist");
        assert_eq!(error, PermissionRepositoryError::not_found(404_i64));
        assert_eq!(store.permission_updates(), 0);
    }
}
