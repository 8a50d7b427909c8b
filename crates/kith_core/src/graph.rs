//! Friendship graph operations
//!
//! Friendships are stored denormalized: each side of a friendship holds the
//! other side's username in its own `friends` list. The store only
//! guarantees single-document atomicity, so every operation here is a short
//! sequence of such calls with the failure points spelled out. Nothing is
//! retried and nothing is rolled back; a failure between steps leaves a
//! state the error describes.

use crate::error::{CoreError, Result};
use crate::id::UserId;
use crate::store::{RecordFilter, RecordPatch, RecordStore, StoreError};
use crate::user::{NewUser, User, UserAttribute};

/// Graph operations over a record store handle.
///
/// Holds nothing besides the store and never caches documents across calls:
/// every operation works from a fresh read of current state.
#[derive(Clone)]
pub struct FriendGraph<S> {
    store: S,
}

impl<S: RecordStore> FriendGraph<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a user. A new user starts with no friends.
    pub async fn create(&self, user: &NewUser) -> Result<UserId> {
        let id = self.store.insert(user).await.map_err(|e| match e {
            StoreError::DuplicateKey { key } => CoreError::Conflict { key },
            cause => CoreError::Store {
                operation: "create.insert",
                cause,
            },
        })?;

        tracing::debug!("Created user '{}' as {}", user.username, id);
        Ok(id)
    }

    /// Friend usernames of one user, in append order.
    ///
    /// An empty list is a normal answer, not an error; only a missing user
    /// is.
    pub async fn friends_of(&self, id: &UserId) -> Result<Vec<String>> {
        let user = self.read(id, "get_friends.read").await?;
        Ok(user.friends)
    }

    /// Record a mutual friendship between two distinct users.
    ///
    /// Two single-document appends, one per side, with no transaction
    /// around them. If the second append fails the first is not undone; the
    /// one-sided state is reported as [`CoreError::PartialFriendship`] and
    /// repair is the caller's decision.
    ///
    /// Returns both records as they look after the appends.
    pub async fn make_friends(&self, source: &UserId, target: &UserId) -> Result<(User, User)> {
        if source == target {
            return Err(CoreError::InvalidArgument {
                operation: "make_friends",
                reason: format!("user {source} cannot befriend itself"),
            });
        }

        // Both usernames have to be known before either side is written.
        let mut first = self.read(source, "make_friends.read").await?;
        let mut second = self.read(target, "make_friends.read").await?;

        // Appends are not deduplicated: befriending twice lists twice.
        // Matched counts are also not inspected here, so a record deleted
        // between the reads and the appends loses its update silently while
        // the other side keeps a dangling username.
        self.store
            .update_by_id(
                source,
                RecordPatch::PushFriend {
                    username: second.username.clone(),
                },
            )
            .await
            .map_err(|cause| CoreError::Store {
                operation: "make_friends.append",
                cause,
            })?;

        self.store
            .update_by_id(
                target,
                RecordPatch::PushFriend {
                    username: first.username.clone(),
                },
            )
            .await
            .map_err(|cause| CoreError::PartialFriendship {
                applied: *source,
                failed: *target,
                cause,
            })?;

        tracing::debug!("'{}' and '{}' are now friends", first.username, second.username);

        first.friends.push(second.username.clone());
        second.friends.push(first.username.clone());
        Ok((first, second))
    }

    /// Delete a user and scrub its username from every other friend list.
    ///
    /// The scrub runs first. If it fails the target is left fully intact;
    /// if the delete then fails the target survives only as an orphan that
    /// no other document references.
    pub async fn remove_user(&self, id: &UserId) -> Result<()> {
        let user = self.read(id, "remove_user.read").await?;

        let scrubbed = self
            .store
            .update_many(
                RecordFilter::FriendsContain {
                    username: user.username.clone(),
                },
                RecordPatch::PullFriend {
                    username: user.username.clone(),
                },
            )
            .await
            .map_err(|cause| CoreError::Store {
                operation: "remove_user.scrub",
                cause,
            })?;

        let deleted = self
            .store
            .delete_by_id(id)
            .await
            .map_err(|cause| CoreError::Store {
                operation: "remove_user.delete",
                cause,
            })?;
        if deleted == 0 {
            // Lost a race with another delete, the goal state is reached
            tracing::debug!("User {} was already gone at delete time", id);
        }

        tracing::debug!(
            "Removed user '{}' ({}), scrubbed from {} friend lists",
            user.username,
            id,
            scrubbed
        );
        Ok(())
    }

    /// Overwrite one mutable scalar attribute of a user.
    pub async fn update_attribute(&self, id: &UserId, attr: UserAttribute) -> Result<()> {
        let matched = self
            .store
            .update_by_id(
                id,
                RecordPatch::Set {
                    field: attr.field(),
                    value: attr.value(),
                },
            )
            .await
            .map_err(|cause| CoreError::Store {
                operation: "update_attribute.set",
                cause,
            })?;

        if matched == 0 {
            return Err(CoreError::UserNotFound {
                operation: "update_attribute.set",
                id: *id,
            });
        }

        tracing::debug!("Updated {} of user {}", attr.field(), id);
        Ok(())
    }

    async fn read(&self, id: &UserId, operation: &'static str) -> Result<User> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|cause| CoreError::Store { operation, cause })?
            .ok_or(CoreError::UserNotFound { operation, id: *id })
    }
}
