//! Snapshot persistence seam.
//!
//! Snapshots are append-only. The store must enforce uniqueness of
//! `(month, version)` — that constraint, surfaced as
//! [`PayrollError::VersionConflict`], is what lets `finalize` serialize
//! concurrent runs for the same month by retrying.

use std::sync::Mutex;

use crate::error::{EngineResult, PayrollError};
use crate::models::PayrollSnapshot;

/// Append-only storage for payroll snapshots.
#[allow(async_fn_in_trait)]
pub trait SnapshotStore {
    /// The highest stored version for a month, `0` when none exist.
    async fn max_version(&self, month: &str) -> EngineResult<u32>;

    /// Fetches one stored snapshot, `None` when absent.
    async fn get(&self, month: &str, version: u32) -> EngineResult<Option<PayrollSnapshot>>;

    /// Appends a snapshot.
    ///
    /// Must fail with [`PayrollError::VersionConflict`] when a snapshot
    /// with the same `(month, version)` already exists, leaving the store
    /// unchanged.
    async fn insert(&self, snapshot: PayrollSnapshot) -> EngineResult<()>;
}

impl<S: SnapshotStore> SnapshotStore for &S {
    async fn max_version(&self, month: &str) -> EngineResult<u32> {
        (**self).max_version(month).await
    }

    async fn get(&self, month: &str, version: u32) -> EngineResult<Option<PayrollSnapshot>> {
        (**self).get(month, version).await
    }

    async fn insert(&self, snapshot: PayrollSnapshot) -> EngineResult<()> {
        (**self).insert(snapshot).await
    }
}

/// In-memory [`SnapshotStore`] enforcing the `(month, version)` contract.
///
/// The reference implementation used by tests; a database-backed store
/// would enforce the same contract with a unique index.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshots: Mutex<Vec<PayrollSnapshot>>,
}

impl MemorySnapshotStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> EngineResult<std::sync::MutexGuard<'_, Vec<PayrollSnapshot>>> {
        self.snapshots.lock().map_err(|_| PayrollError::Store {
            message: "snapshot store mutex poisoned".to_string(),
        })
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn max_version(&self, month: &str) -> EngineResult<u32> {
        let snapshots = self.lock()?;
        Ok(snapshots
            .iter()
            .filter(|s| s.month == month)
            .map(|s| s.version)
            .max()
            .unwrap_or(0))
    }

    async fn get(&self, month: &str, version: u32) -> EngineResult<Option<PayrollSnapshot>> {
        let snapshots = self.lock()?;
        Ok(snapshots
            .iter()
            .find(|s| s.month == month && s.version == version)
            .cloned())
    }

    async fn insert(&self, snapshot: PayrollSnapshot) -> EngineResult<()> {
        let mut snapshots = self.lock()?;
        if snapshots
            .iter()
            .any(|s| s.month == snapshot.month && s.version == snapshot.version)
        {
            return Err(PayrollError::VersionConflict {
                month: snapshot.month,
                version: snapshot.version,
            });
        }
        snapshots.push(snapshot);
        Ok(())
    }
}
