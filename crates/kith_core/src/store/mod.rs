//! Record store abstraction
//!
//! The graph layer is built on five single-document operations. Each call
//! is atomic on its own document (or document set, for [`RecordStore::update_many`])
//! and nothing here spans documents: all cross-document reasoning lives in
//! the graph layer above.

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

use crate::id::UserId;
use crate::user::{NewUser, User};

pub mod surreal;

pub use surreal::SurrealStore;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug, Diagnostic)]
pub enum StoreError {
    #[error("Store connection failed")]
    #[diagnostic(help("Check the store configuration and that the backing database is reachable"))]
    ConnectionFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Store query failed")]
    QueryFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Duplicate key: {key}")]
    DuplicateKey { key: String },

    #[error("Record {id} could not be decoded as a user document")]
    #[diagnostic(help("The stored document does not match the expected user layout"))]
    Decode {
        id: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A single-field change applied to one or many user documents.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordPatch {
    /// Overwrite one scalar field
    Set {
        field: &'static str,
        value: serde_json::Value,
    },
    /// Append a username to `friends`; duplicates are kept
    PushFriend { username: String },
    /// Remove every occurrence of a username from `friends`
    PullFriend { username: String },
}

/// Predicate for selecting documents in [`RecordStore::update_many`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordFilter {
    /// Documents whose `friends` list contains the username
    FriendsContain { username: String },
}

/// The single-document operations the graph layer is built on.
///
/// Matched and deleted counts are returned rather than turned into errors
/// here: whether a zero count is a failure depends on the operation, and
/// that is the graph layer's decision.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new user document with an empty friends list and return the
    /// assigned id.
    async fn insert(&self, user: &NewUser) -> StoreResult<UserId>;

    /// Fetch one user document by id.
    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>>;

    /// Apply a patch to one document. Returns how many documents matched,
    /// 0 or 1.
    async fn update_by_id(&self, id: &UserId, patch: RecordPatch) -> StoreResult<u64>;

    /// Apply a patch to every document matching the filter. Returns how
    /// many documents were modified.
    async fn update_many(&self, filter: RecordFilter, patch: RecordPatch) -> StoreResult<u64>;

    /// Delete one document by id. Returns how many documents were deleted,
    /// 0 or 1.
    async fn delete_by_id(&self, id: &UserId) -> StoreResult<u64>;
}
