//! Error taxonomy for the friendship graph
//!
//! Every error names the operation it came from, and the operation strings
//! include the sub-step that failed (for example `remove_user.scrub` versus
//! `remove_user.delete`), so callers can tell a clean failure from one that
//! left a partially applied state behind.

use miette::Diagnostic;
use thiserror::Error;

use crate::id::{IdError, UserId};
use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug, Diagnostic)]
pub enum CoreError {
    #[error("User not found")]
    #[diagnostic(
        code(kith_core::user_not_found),
        help("Check that the user ID is correct and that the user still exists")
    )]
    UserNotFound {
        /// Operation and sub-step that hit the missing record
        operation: &'static str,
        id: UserId,
    },

    #[error("Invalid user ID: '{input}'")]
    #[diagnostic(
        code(kith_core::invalid_id),
        help("User IDs look like 'user_<uuid>'")
    )]
    InvalidId {
        input: String,
        #[source]
        cause: IdError,
    },

    #[error("Invalid argument for {operation}: {reason}")]
    #[diagnostic(code(kith_core::invalid_argument))]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    #[error("Duplicate key on insert: {key}")]
    #[diagnostic(
        code(kith_core::conflict),
        help("The generated record key already exists, retry the create")
    )]
    Conflict { key: String },

    #[error("Friendship between {applied} and {failed} was only partially applied")]
    #[diagnostic(
        code(kith_core::partial_friendship),
        help("{applied} now lists {failed} as a friend but not the other way around; whether to repair or retry is the caller's call")
    )]
    PartialFriendship {
        /// Side whose friend list was already updated
        applied: UserId,
        /// Side whose update failed
        failed: UserId,
        #[source]
        cause: StoreError,
    },

    #[error("Store call failed during {operation}")]
    #[diagnostic(
        code(kith_core::store_failure),
        help("The record store rejected the call; nothing is retried automatically")
    )]
    Store {
        operation: &'static str,
        #[source]
        cause: StoreError,
    },
}
