//! SurrealDB-backed record store

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use surrealdb::engine::any::{self, Any};
use surrealdb::{RecordId, Surreal};

use crate::config::StoreConfig;
use crate::id::{IdType, UserId, UserIdType};
use crate::store::{RecordFilter, RecordPatch, RecordStore, StoreError, StoreResult};
use crate::user::{NewUser, User};

/// Table holding user documents, same as the id prefix.
const USER_TABLE: &str = UserIdType::PREFIX;

/// Record store over a SurrealDB connection, embedded or remote.
///
/// Cloning is cheap and clones share the underlying connection.
#[derive(Clone)]
pub struct SurrealStore {
    db: Surreal<Any>,
}

/// Database representation of a user document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DbUser {
    id: RecordId,
    username: String,
    age: String,
    #[serde(default)]
    friends: Vec<String>,
    created_at: surrealdb::Datetime,
    updated_at: surrealdb::Datetime,
}

impl TryFrom<DbUser> for User {
    type Error = StoreError;

    fn try_from(db_user: DbUser) -> Result<Self, Self::Error> {
        let id = UserId::from_record(&db_user.id).map_err(|e| StoreError::Decode {
            id: db_user.id.to_string(),
            cause: Box::new(e),
        })?;
        Ok(User {
            id,
            username: db_user.username,
            age: db_user.age,
            friends: db_user.friends,
        })
    }
}

fn query_failed(e: surrealdb::Error) -> StoreError {
    StoreError::QueryFailed(Box::new(e))
}

fn connection_failed(e: surrealdb::Error) -> StoreError {
    StoreError::ConnectionFailed(Box::new(e))
}

impl SurrealStore {
    /// Connect according to the configuration and select the namespace and
    /// database.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        if let StoreConfig::Embedded { path } = config {
            // Ensure the parent directory exists for file-based storage
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| StoreError::ConnectionFailed(Box::new(e)))?;
                }
            }
        }

        let address = config.address();
        tracing::info!("Connecting to record store at: {}", address);
        let db = any::connect(address).await.map_err(connection_failed)?;

        if let StoreConfig::Remote {
            username: Some(username),
            password: Some(password),
            ..
        } = config
        {
            db.signin(surrealdb::opt::auth::Root { username, password })
                .await
                .map_err(connection_failed)?;
        }

        db.use_ns(config.namespace())
            .use_db(config.database())
            .await
            .map_err(connection_failed)?;

        Ok(Self { db })
    }

    /// In-memory store, mainly for tests.
    pub async fn memory() -> StoreResult<Self> {
        Self::connect(&StoreConfig::Memory).await
    }

    /// Check that the connection is still alive.
    pub async fn health(&self) -> StoreResult<()> {
        self.db.health().await.map_err(connection_failed)
    }
}

/// SurrealQL `SET` clause for a patch. The patch value itself is always
/// bound as `$value`, never spliced into the query text.
fn patch_clause(patch: &RecordPatch) -> String {
    match patch {
        RecordPatch::Set { field, .. } => {
            format!("{field} = $value, updated_at = time::now()")
        }
        RecordPatch::PushFriend { .. } => {
            "friends += $value, updated_at = time::now()".to_string()
        }
        RecordPatch::PullFriend { .. } => {
            // Drops every occurrence of $value, keeps everything else as
            // is, duplicates included. A closure predicate cannot be used
            // here: closures do not see statement-scope bindings.
            "friends = array::complement(friends, [$value]), updated_at = time::now()"
                .to_string()
        }
    }
}

fn patch_value(patch: RecordPatch) -> serde_json::Value {
    match patch {
        RecordPatch::Set { value, .. } => value,
        RecordPatch::PushFriend { username } | RecordPatch::PullFriend { username } => {
            serde_json::Value::String(username)
        }
    }
}

/// SurrealQL `WHERE` predicate for a filter, with its value bound as
/// `$needle`.
fn filter_clause(filter: &RecordFilter) -> &'static str {
    match filter {
        RecordFilter::FriendsContain { .. } => "friends CONTAINS $needle",
    }
}

fn filter_value(filter: RecordFilter) -> String {
    match filter {
        RecordFilter::FriendsContain { username } => username,
    }
}

#[async_trait]
impl RecordStore for SurrealStore {
    async fn insert(&self, user: &NewUser) -> StoreResult<UserId> {
        let id = UserId::generate();
        let now = chrono::Utc::now();

        let db_user = DbUser {
            id: RecordId::from(id),
            username: user.username.clone(),
            age: user.age.clone(),
            friends: Vec::new(),
            created_at: now.into(),
            updated_at: now.into(),
        };

        let created: Option<DbUser> = self
            .db
            .create((USER_TABLE, id.record_key()))
            .content(db_user)
            .await
            .map_err(|e| match e {
                surrealdb::Error::Db(surrealdb::error::Db::RecordExists { thing, .. }) => {
                    StoreError::DuplicateKey {
                        key: thing.to_string(),
                    }
                }
                other => query_failed(other),
            })?;

        match created {
            Some(db_user) => Ok(User::try_from(db_user)?.id),
            None => Err(StoreError::QueryFailed(
                "insert returned no document".into(),
            )),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        let db_user: Option<DbUser> = self
            .db
            .select((USER_TABLE, id.record_key()))
            .await
            .map_err(query_failed)?;

        db_user.map(User::try_from).transpose()
    }

    async fn update_by_id(&self, id: &UserId, patch: RecordPatch) -> StoreResult<u64> {
        let query = format!(
            "UPDATE type::thing($tb, $key) SET {} RETURN VALUE id",
            patch_clause(&patch)
        );

        let matched: Vec<RecordId> = self
            .db
            .query(query)
            .bind(("tb", USER_TABLE))
            .bind(("key", id.record_key()))
            .bind(("value", patch_value(patch)))
            .await
            .map_err(query_failed)?
            .take(0)
            .map_err(query_failed)?;

        Ok(matched.len() as u64)
    }

    async fn update_many(&self, filter: RecordFilter, patch: RecordPatch) -> StoreResult<u64> {
        let query = format!(
            "UPDATE type::table($tb) SET {} WHERE {} RETURN VALUE id",
            patch_clause(&patch),
            filter_clause(&filter)
        );

        let modified: Vec<RecordId> = self
            .db
            .query(query)
            .bind(("tb", USER_TABLE))
            .bind(("value", patch_value(patch)))
            .bind(("needle", filter_value(filter)))
            .await
            .map_err(query_failed)?
            .take(0)
            .map_err(query_failed)?;

        Ok(modified.len() as u64)
    }

    async fn delete_by_id(&self, id: &UserId) -> StoreResult<u64> {
        let deleted: Option<DbUser> = self
            .db
            .delete((USER_TABLE, id.record_key()))
            .await
            .map_err(query_failed)?;

        Ok(u64::from(deleted.is_some()))
    }
}
