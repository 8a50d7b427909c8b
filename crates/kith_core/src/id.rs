//! Type-safe ID generation and parsing
//!
//! Ids render as `prefix_<uuid>` on the wire; the prefix doubles as the
//! store table name and the UUID as the record key.

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use surrealdb::RecordId;
use uuid::Uuid;

/// A type-safe ID with a consistent prefix and UUID
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    /// The unique identifier
    uuid: Uuid,
    /// Phantom data to make each ID type unique
    _phantom: PhantomData<T>,
}

impl<T: IdType> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", T::PREFIX, self.uuid)
    }
}

/// Trait for types that can be used as ID markers
pub trait IdType: Send + Sync + 'static {
    /// The prefix for this ID type; also the table its records live in
    const PREFIX: &'static str;
}

/// Errors that can occur when working with IDs
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum IdError {
    #[error("Invalid ID format: expected prefix '{expected}', got '{actual}'")]
    #[diagnostic(help("Ensure the ID starts with the correct prefix followed by an underscore"))]
    InvalidPrefix { expected: String, actual: String },

    #[error("Invalid UUID: {0}")]
    #[diagnostic(help("The UUID portion of the ID must be a valid UUID"))]
    InvalidUuid(#[from] uuid::Error),

    #[error("Invalid ID format: {0}")]
    #[diagnostic(help(
        "IDs must be in the format 'prefix_uuid' where prefix matches the expected type"
    ))]
    InvalidFormat(String),
}

/// Record id keys that are not plain identifiers come back from the store
/// escaped, in angle brackets or backticks depending on the engine
/// version.
fn strip_brackets(s: &str) -> &str {
    s.strip_prefix('⟨')
        .and_then(|s| s.strip_suffix('⟩'))
        .or_else(|| s.strip_prefix('`').and_then(|s| s.strip_suffix('`')))
        .unwrap_or(s)
}

impl<T: IdType> Id<T> {
    /// Create a new ID with a generated UUID
    pub fn generate() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            _phantom: PhantomData,
        }
    }

    /// Create an ID from a specific UUID (useful for tests)
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _phantom: PhantomData,
        }
    }

    /// Parse an ID from a string
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let parts: Vec<&str> = s.splitn(2, '_').collect();
        if parts.len() != 2 {
            return Err(IdError::InvalidFormat(
                "ID must be in format 'prefix_uuid'".to_string(),
            ));
        }

        let [prefix, uuid_str] = [parts[0], parts[1]];

        if prefix != T::PREFIX {
            return Err(IdError::InvalidPrefix {
                expected: T::PREFIX.to_string(),
                actual: prefix.to_string(),
            });
        }

        let uuid = Uuid::parse_str(uuid_str)?;

        Ok(Self {
            uuid,
            _phantom: PhantomData,
        })
    }

    /// Get the UUID part
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Get the prefix for this ID type
    pub fn prefix(&self) -> &'static str {
        T::PREFIX
    }

    /// The bare record key stored under this ID's table
    pub fn record_key(&self) -> String {
        self.uuid.to_string()
    }

    /// Recover an ID from a store record, checking the table matches
    pub fn from_record(record: &RecordId) -> Result<Self, IdError> {
        if record.table() != T::PREFIX {
            return Err(IdError::InvalidPrefix {
                expected: T::PREFIX.to_string(),
                actual: record.table().to_string(),
            });
        }
        let uuid = Uuid::from_str(strip_brackets(&record.key().to_string()))?;
        Ok(Self::from_uuid(uuid))
    }

    /// Create a nil/empty ID (all zeros)
    pub fn nil() -> Self {
        Self {
            uuid: Uuid::nil(),
            _phantom: PhantomData,
        }
    }

    /// Check if this is a nil/empty ID
    pub fn is_nil(&self) -> bool {
        self.uuid.is_nil()
    }
}

impl<T: IdType> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", T::PREFIX, self.uuid)
    }
}

impl<T: IdType> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T: IdType> From<Id<T>> for String {
    fn from(id: Id<T>) -> Self {
        id.to_string()
    }
}

impl<T: IdType> From<Id<T>> for RecordId {
    fn from(id: Id<T>) -> Self {
        RecordId::from_table_key(T::PREFIX, id.uuid.to_string())
    }
}

impl<T: IdType> From<&Id<T>> for RecordId {
    fn from(id: &Id<T>) -> Self {
        RecordId::from_table_key(T::PREFIX, id.uuid.to_string())
    }
}

impl<T: IdType> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}_{}", T::PREFIX, self.uuid()))
    }
}

impl<'de, T: IdType> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let visitor: Id<T> = Id::nil();
        deserializer.deserialize_str(visitor)
    }
}

impl<'de, T: IdType> Visitor<'de> for Id<T> {
    type Value = Id<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "A string with the format 'prefix_UUID'")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Id::parse(s).map_err(de::Error::custom)
    }
}

/// Macro to define new ID types with minimal boilerplate
#[macro_export]
macro_rules! define_id_type {
    ($type_name:ident, $prefix:expr) => {
        /// Marker type for the ID
        #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
        pub struct $type_name;

        impl $crate::id::IdType for $type_name {
            const PREFIX: &'static str = $prefix;
        }
    };
}

define_id_type!(UserIdType, "user");

/// Type alias for User IDs
pub type UserId = Id<UserIdType>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generation() {
        let id1 = UserId::generate();
        let id2 = UserId::generate();

        // IDs should be unique
        assert_ne!(id1, id2);

        // IDs should have correct prefix
        assert_eq!(id1.prefix(), "user");
        assert!(id2.to_string().starts_with("user_"));
    }

    #[test]
    fn test_id_parsing() {
        let id = UserId::generate();
        let id_str = id.to_string();

        // Should be able to parse back
        let parsed = UserId::parse(&id_str).unwrap();
        assert_eq!(id, parsed);

        // Should fail with invalid format
        assert!(UserId::parse("invalid").is_err());
        assert!(UserId::parse("user_").is_err());
        assert!(UserId::parse("user_not-a-uuid").is_err());
        assert!(UserId::parse("agent_00000000-0000-0000-0000-000000000000").is_err());

        // Should succeed with valid format
        let uuid = Uuid::new_v4();
        assert!(UserId::parse(&format!("user_{}", uuid)).is_ok());
    }

    #[test]
    fn test_id_serialization() {
        let id = UserId::generate();

        let json = serde_json::to_string(&id).unwrap();
        let deserialized: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);

        // Should serialize as "prefix_uuid"
        assert!(json.contains("user_"));
    }

    #[test]
    fn test_record_id_round_trip() {
        let id = UserId::generate();
        let record = RecordId::from(&id);
        assert_eq!(record.table(), "user");

        let recovered = UserId::from_record(&record).unwrap();
        assert_eq!(recovered, id);
    }

    #[test]
    fn test_strip_escaped_record_keys() {
        let raw = "d6e66165-0b2a-4e4c-9c3f-8b0a15a3d0a1";
        assert_eq!(strip_brackets(&format!("⟨{raw}⟩")), raw);
        assert_eq!(strip_brackets(&format!("`{raw}`")), raw);
        assert_eq!(strip_brackets(raw), raw);
    }

    #[test]
    fn test_nil_id() {
        let nil_id = UserId::nil();
        assert!(nil_id.is_nil());
        assert_eq!(
            nil_id.to_string(),
            "user_00000000-0000-0000-0000-000000000000"
        );
    }
}
