//! Wire models for the HTTP API

use serde::{Deserialize, Serialize};

use kith_core::{User, UserId};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub age: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub age: String,
    pub friends: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            age: user.age,
            friends: user.friends,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendsResponse {
    /// The id as it appeared in the request path
    pub id: String,
    pub friends: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MakeFriendsRequest {
    pub source_id: String,
    pub target_id: String,
}

/// Both sides of a new friendship, as they look after the append.
#[derive(Debug, Clone, Serialize)]
pub struct MakeFriendsResponse {
    pub source: UserResponse,
    pub target: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub store_status: ComponentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Ok,
    Unavailable,
}
