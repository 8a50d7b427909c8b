//! User service
//!
//! Thin wire-facing layer: parses raw id strings into typed ids and hands
//! everything else to [`FriendGraph`]. All friendship semantics live there.

use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::graph::FriendGraph;
use crate::id::UserId;
use crate::store::RecordStore;
use crate::user::{NewUser, User, UserAttribute};

#[derive(Clone)]
pub struct UserService<S> {
    graph: FriendGraph<S>,
}

impl<S: RecordStore> UserService<S> {
    pub fn new(store: S) -> Self {
        Self {
            graph: FriendGraph::new(store),
        }
    }

    /// Create a new user with an empty friend list.
    pub async fn create(&self, user: NewUser) -> Result<UserId> {
        self.graph.create(&user).await
    }

    /// Friend usernames of the given user.
    pub async fn friends_of(&self, id: &str) -> Result<Vec<String>> {
        let id = parse_id(id)?;
        self.graph.friends_of(&id).await
    }

    /// Record a mutual friendship and return both updated records.
    pub async fn make_friends(&self, source: &str, target: &str) -> Result<(User, User)> {
        let source = parse_id(source)?;
        let target = parse_id(target)?;
        self.graph.make_friends(&source, &target).await
    }

    /// Delete a user and scrub it from every friend list.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;
        self.graph.remove_user(&id).await
    }

    /// Overwrite one mutable attribute of a user.
    pub async fn update_attribute(&self, id: &str, attr: UserAttribute) -> Result<()> {
        let id = parse_id(id)?;
        self.graph.update_attribute(&id, attr).await
    }
}

/// Malformed ids are rejected here, before any store call.
fn parse_id(input: &str) -> Result<UserId> {
    UserId::from_str(input).map_err(|cause| CoreError::InvalidId {
        input: input.to_string(),
        cause,
    })
}
