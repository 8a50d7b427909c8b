//! Store wrappers for driving the graph through failures and interleavings

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use kith_core::id::UserId;
use kith_core::store::{RecordFilter, RecordPatch, RecordStore, StoreError, StoreResult};
use kith_core::user::{NewUser, User};

/// Which store calls should fail. Everything not named passes through.
#[derive(Debug, Clone, Default)]
pub struct FailurePlan {
    /// Fail the nth `update_by_id` call, 1-based
    pub update_by_id: Option<usize>,
    /// Fail every `update_many` call
    pub update_many: bool,
    /// Fail every `delete_by_id` call
    pub delete_by_id: bool,
}

/// Per-method call counters, shared across clones.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub insert: AtomicUsize,
    pub find: AtomicUsize,
    pub update_by_id: AtomicUsize,
    pub update_many: AtomicUsize,
    pub delete: AtomicUsize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.insert.load(Ordering::SeqCst)
            + self.find.load(Ordering::SeqCst)
            + self.update_by_id.load(Ordering::SeqCst)
            + self.update_many.load(Ordering::SeqCst)
            + self.delete.load(Ordering::SeqCst)
    }
}

fn injected(call: &str) -> StoreError {
    StoreError::QueryFailed(format!("injected failure in {call}").into())
}

/// Forwards to an inner store, failing the calls the plan names.
#[derive(Clone)]
pub struct FlakyStore<S> {
    inner: S,
    plan: FailurePlan,
    calls: Arc<CallCounts>,
}

impl<S> FlakyStore<S> {
    pub fn new(inner: S, plan: FailurePlan) -> Self {
        Self {
            inner,
            plan,
            calls: Arc::new(CallCounts::default()),
        }
    }

    pub fn calls(&self) -> Arc<CallCounts> {
        self.calls.clone()
    }
}

#[async_trait]
impl<S: RecordStore> RecordStore for FlakyStore<S> {
    async fn insert(&self, user: &NewUser) -> StoreResult<UserId> {
        self.calls.insert.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(user).await
    }

    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        self.calls.find.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn update_by_id(&self, id: &UserId, patch: RecordPatch) -> StoreResult<u64> {
        let seen = self.calls.update_by_id.fetch_add(1, Ordering::SeqCst) + 1;
        if self.plan.update_by_id == Some(seen) {
            return Err(injected("update_by_id"));
        }
        self.inner.update_by_id(id, patch).await
    }

    async fn update_many(&self, filter: RecordFilter, patch: RecordPatch) -> StoreResult<u64> {
        self.calls.update_many.fetch_add(1, Ordering::SeqCst);
        if self.plan.update_many {
            return Err(injected("update_many"));
        }
        self.inner.update_many(filter, patch).await
    }

    async fn delete_by_id(&self, id: &UserId) -> StoreResult<u64> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        if self.plan.delete_by_id {
            return Err(injected("delete_by_id"));
        }
        self.inner.delete_by_id(id).await
    }
}

/// Signals for coordinating with a store parked inside [`GatedStore`].
pub struct Gate {
    /// Notified once a call has reached the gate and parked
    pub arrived: Arc<Notify>,
    /// Notify to let the parked call continue
    pub release: Arc<Notify>,
}

/// Parks the first `PushFriend` update until released, letting a concurrent
/// operation interleave at that exact point. Everything else passes through.
#[derive(Clone)]
pub struct GatedStore<S> {
    inner: S,
    arrived: Arc<Notify>,
    release: Arc<Notify>,
    armed: Arc<AtomicBool>,
}

impl<S> GatedStore<S> {
    pub fn new(inner: S) -> (Self, Gate) {
        let arrived = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let store = Self {
            inner,
            arrived: arrived.clone(),
            release: release.clone(),
            armed: Arc::new(AtomicBool::new(true)),
        };
        (store, Gate { arrived, release })
    }
}

#[async_trait]
impl<S: RecordStore> RecordStore for GatedStore<S> {
    async fn insert(&self, user: &NewUser) -> StoreResult<UserId> {
        self.inner.insert(user).await
    }

    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        self.inner.find_by_id(id).await
    }

    async fn update_by_id(&self, id: &UserId, patch: RecordPatch) -> StoreResult<u64> {
        if matches!(patch, RecordPatch::PushFriend { .. })
            && self.armed.swap(false, Ordering::SeqCst)
        {
            let released = self.release.notified();
            self.arrived.notify_one();
            released.await;
        }
        self.inner.update_by_id(id, patch).await
    }

    async fn update_many(&self, filter: RecordFilter, patch: RecordPatch) -> StoreResult<u64> {
        self.inner.update_many(filter, patch).await
    }

    async fn delete_by_id(&self, id: &UserId) -> StoreResult<u64> {
        self.inner.delete_by_id(id).await
    }
}
