//! Kith Core - Friendship Graph and Record Store
//!
//! This crate provides the denormalized friendship graph that powers Kith:
//! user records that carry their friends' usernames inline, a record store
//! abstraction with single-document atomicity, and the operation sequences
//! that keep both sides of every friendship coherent without transactions.

pub mod config;
pub mod error;
pub mod graph;
pub mod id;
pub mod service;
pub mod store;
pub mod user;

// Macros are automatically available at crate root due to #[macro_export]

pub use config::StoreConfig;
pub use error::{CoreError, Result};
pub use graph::FriendGraph;
pub use id::{Id, IdError, IdType, UserId};
pub use service::UserService;
pub use store::{RecordFilter, RecordPatch, RecordStore, StoreError, StoreResult, SurrealStore};
pub use user::{NewUser, User, UserAttribute};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        CoreError, FriendGraph, Id, IdType, NewUser, RecordStore, Result, StoreConfig, SurrealStore,
        User, UserAttribute, UserId, UserService,
    };
}
