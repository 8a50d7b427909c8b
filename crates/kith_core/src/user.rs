//! User model
//!
//! A user's friendships are denormalized: each user document carries the
//! usernames of its friends, and the same friendship is recorded once on
//! each side. The graph layer owns keeping those copies coherent.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A stored user profile together with its denormalized friend list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned on creation and never changed
    pub id: UserId,
    /// Display name, also the value other users' friend lists hold
    pub username: String,
    /// Freeform age attribute, stored as text
    pub age: String,
    /// Usernames of this user's friends, in append order
    #[serde(default)]
    pub friends: Vec<String>,
}

/// Input for creating a user.
///
/// There is no friends field here: a new user always starts with an empty
/// list, and friendships are only formed through the graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub age: String,
}

/// A mutable scalar attribute of a user.
///
/// `username` and `friends` are deliberately not representable. Usernames
/// are the keys held in other users' friend lists, so renaming would break
/// every reference, and the friends list is owned by the graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum UserAttribute {
    Age(String),
}

impl UserAttribute {
    /// Document field this attribute is stored under.
    pub fn field(&self) -> &'static str {
        match self {
            UserAttribute::Age(_) => "age",
        }
    }

    /// Value to store in that field.
    pub fn value(&self) -> serde_json::Value {
        match self {
            UserAttribute::Age(age) => serde_json::Value::String(age.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attribute_wire_format() {
        let attr = UserAttribute::Age("31".to_string());
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json, serde_json::json!({"field": "age", "value": "31"}));

        let parsed: UserAttribute =
            serde_json::from_value(serde_json::json!({"field": "age", "value": "40"})).unwrap();
        assert_eq!(parsed, UserAttribute::Age("40".to_string()));
    }

    #[test]
    fn test_attribute_rejects_unknown_fields() {
        let result: Result<UserAttribute, _> =
            serde_json::from_value(serde_json::json!({"field": "username", "value": "eve"}));
        assert!(result.is_err());

        let result: Result<UserAttribute, _> =
            serde_json::from_value(serde_json::json!({"field": "friends", "value": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_user_friends_default_to_empty() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "user_00000000-0000-0000-0000-000000000000",
            "username": "alice",
            "age": "30",
        }))
        .unwrap();
        assert!(user.friends.is_empty());
    }
}
