//! First-run detection backed by a persisted setup flag.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::ports::{FlagClaim, SetupFlagKey, SetupStore, SetupStoreError};

/// Errors raised by the first-run gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FirstRunError {
    /// The setup store could not be read or written.
    #[error("first-run flag storage unavailable: {0}")]
    StorageUnavailable(#[from] SetupStoreError),
}

/// Single-use trigger answering whether initialization should run.
///
/// The flag is claimed before any initialization work starts, so a run that
/// fails midway still counts as initialized. [`FirstRunGate::reset`] clears
/// the flag for an explicit retry.
#[derive(Clone)]
pub struct FirstRunGate<S> {
    store: Arc<S>,
    key: SetupFlagKey,
}

impl<S> FirstRunGate<S> {
    /// Create a gate over `key` in the given store.
    pub fn new(store: Arc<S>, key: SetupFlagKey) -> Self {
        Self { store, key }
    }
}

impl<S> FirstRunGate<S>
where
    S: SetupStore,
{
    /// Mark the flag as set and report whether it was previously unset.
    ///
    /// Returns `true` exactly once per fresh flag state.
    ///
    /// # Errors
    ///
    /// Returns [`FirstRunError::StorageUnavailable`] when the store fails;
    /// callers must not initialize in that case.
    pub async fn should_initialize(&self) -> Result<bool, FirstRunError> {
        let claim = self.store.claim_flag(&self.key).await?;
        debug!(
            environment = self.key.environment(),
            key = self.key.key(),
            ?claim,
            "first-run flag checked"
        );
        Ok(claim == FlagClaim::Claimed)
    }

    /// Report whether initialization has been claimed, without claiming it.
    ///
    /// # Errors
    ///
    /// Returns [`FirstRunError::StorageUnavailable`] when the store fails.
    pub async fn has_initialized(&self) -> Result<bool, FirstRunError> {
        let flag = self.store.get_flag(&self.key).await?;
        Ok(flag.unwrap_or(false))
    }

    /// Clear the flag so the next [`FirstRunGate::should_initialize`] call
    /// returns `true` again.
    ///
    /// # Errors
    ///
    /// Returns [`FirstRunError::StorageUnavailable`] when the store fails.
    pub async fn reset(&self) -> Result<(), FirstRunError> {
        self.store.set_flag(&self.key, false).await?;
        info!(
            environment = self.key.environment(),
            key = self.key.key(),
            "first-run flag reset"
        );
        Ok(())
    }
}
