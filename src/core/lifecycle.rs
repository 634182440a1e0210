//! Database and user lifecycle.
//!
//! Account and database DDL is not transactional on the server, so each
//! multi-step operation undoes itself on failure with a forced delete.
//! The undo never fails the operation: its errors are logged and dropped,
//! and the caller sees the error of the step that failed.

use crate::core::dialect::Dialect;
use crate::core::remote::Remote;
use crate::core::root;
use crate::error::{ER_CANNOT_USER, ER_DB_CREATE_EXISTS};
use crate::models::identity::{expand_identities, Identity};
use crate::models::request::{
    AccessChangeRequest, CreateRequest, DeleteRequest, PasswordChangeRequest, ALL_DATABASES,
};
use crate::{Error, Result};

/// Timeout for compensating deletes and `flush privileges`.
pub const CLEANUP_TIMEOUT_SECS: u64 = 300;

/// Character set to default collation.
const COLLATIONS: &[(&str, &str)] = &[
    ("utf8", "utf8_general_ci"),
    ("utf8mb4", "utf8mb4_general_ci"),
    ("gbk", "gbk_chinese_ci"),
    ("big5", "big5_chinese_ci"),
];

/// Collation used when creating a database with `charset`.
pub fn collation_for(charset: &str) -> Result<&'static str> {
    COLLATIONS
        .iter()
        .find(|(name, _)| *name == charset)
        .map(|(_, collation)| *collation)
        .ok_or_else(|| Error::UnsupportedCharset(charset.to_string()))
}

/// What the undo of a failed user setup removes besides the users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Undo {
    /// Nothing; the accounts existed before this call.
    Nothing,
    /// Users only; the database existed before.
    Users,
    /// Users and the database this operation created.
    UsersAndDatabase,
}

impl Remote {
    /// Create a database and a user with all privileges on it.
    pub async fn create(&self, info: &CreateRequest) -> Result<()> {
        let collation = collation_for(&info.format)?;

        let undo = if info.name == ALL_DATABASES {
            Undo::Users
        } else {
            let create_sql = format!(
                "create database `{}` default character set {} collate {}",
                info.name, info.format, collation
            );
            if let Err(e) = self.exec(&create_sql, "", info.timeout).await {
                if e.server_code() == Some(ER_DB_CREATE_EXISTS) {
                    return Err(Error::DatabaseAlreadyExists(info.name.clone()));
                }
                return Err(e);
            }
            tracing::info!("Created database {}", info.name);
            Undo::UsersAndDatabase
        };

        self.create_user(info, undo).await
    }

    /// Create every identity in the scope and grant it the database.
    async fn create_user(&self, info: &CreateRequest, undo: Undo) -> Result<()> {
        let dialect = Dialect::from_version(&info.version);

        for identity in expand_identities(&info.username, &info.permission) {
            let create_sql = format!(
                "create user {} identified by '{}';",
                identity, info.password
            );
            if let Err(e) = self.exec(&create_sql, &info.password, info.timeout).await {
                self.compensate(info, undo).await;
                if e.server_code() == Some(ER_CANNOT_USER) {
                    return Err(Error::UserAlreadyExists(identity.to_string()));
                }
                return Err(e);
            }

            let grant_sql = dialect.grant_clause(&grant_all(&info.name, &identity), &info.password);
            if let Err(e) = self.exec(&grant_sql, &info.password, info.timeout).await {
                self.compensate(info, undo).await;
                return Err(e);
            }
            tracing::info!("Created user {} with access to {}", identity, info.name);
        }

        Ok(())
    }

    /// Best-effort undo of a partially created user setup.
    async fn compensate(&self, info: &CreateRequest, undo: Undo) {
        let name = match undo {
            Undo::Nothing => {
                tracing::warn!("Not rolling back existing accounts of {}", info.username);
                return;
            }
            Undo::UsersAndDatabase => info.name.clone(),
            Undo::Users => String::new(),
        };
        tracing::warn!("Rolling back user {} on {}", info.username, info.permission);

        let cleanup = DeleteRequest {
            name,
            username: info.username.clone(),
            permission: info.permission.clone(),
            version: info.version.clone(),
            force_delete: true,
            timeout: CLEANUP_TIMEOUT_SECS,
        };
        if let Err(e) = self.delete(&cleanup).await {
            tracing::warn!("Rollback failed, ignoring: {}", e);
        }
    }

    /// Drop every identity in the scope, then the database if one is named.
    ///
    /// With `force_delete` each failing step is logged and skipped;
    /// otherwise the first failure aborts the rest.
    pub async fn delete(&self, info: &DeleteRequest) -> Result<()> {
        let dialect = Dialect::from_version(&info.version);

        for identity in expand_identities(&info.username, &info.permission) {
            let drop_sql = dialect.drop_user_clause(&identity);
            if let Err(e) = self.exec(&drop_sql, "", info.timeout).await {
                if !info.force_delete {
                    return Err(e);
                }
                tracing::warn!("Ignoring failed drop of {}: {}", identity, e);
            }
        }

        if !info.name.is_empty() {
            let drop_sql = format!("drop database if exists `{}`", info.name);
            if let Err(e) = self.exec(&drop_sql, "", info.timeout).await {
                if !info.force_delete {
                    return Err(e);
                }
                tracing::warn!("Ignoring failed drop of database {}: {}", info.name, e);
            }
        }

        if !info.force_delete {
            tracing::info!(
                "execute delete database sql successful, now start to drop uploads and records"
            );
        }
        Ok(())
    }

    /// Change a user's password on every host in its scope.
    ///
    /// For root the scope is ignored; see [`root::password_targets`].
    pub async fn change_password(&self, info: &PasswordChangeRequest) -> Result<()> {
        let dialect = Dialect::from_version(&info.version);

        let targets = if root::is_root(&info.username) {
            let hosts = self.executor.query_root_hosts(info.timeout).await?;
            root::password_targets(&hosts)
        } else {
            expand_identities(&info.username, &info.permission)
        };

        for identity in targets {
            let sql = dialect.password_clause(&identity, &info.password);
            self.exec(&sql, &info.password, info.timeout).await?;
            tracing::info!("Changed password for {}", identity);
        }
        Ok(())
    }

    /// Move a user from its old host scope to a new one.
    ///
    /// The old scope is revoked first when it differs. Root stops there; other
    /// users are re-created on the new scope and privileges are flushed.
    pub async fn change_access(&self, info: &AccessChangeRequest) -> Result<()> {
        let mut info = info.clone();
        root::pin_access_scope(&mut info);

        if info.permission != info.old_permission {
            self.delete(&DeleteRequest {
                name: String::new(),
                username: info.username.clone(),
                permission: info.old_permission.clone(),
                version: info.version.clone(),
                force_delete: true,
                timeout: CLEANUP_TIMEOUT_SECS,
            })
            .await?;
            if root::is_root(&info.username) {
                return Ok(());
            }
        }

        let create = CreateRequest {
            name: info.name.clone(),
            format: String::new(),
            username: info.username.clone(),
            password: info.password.clone(),
            permission: info.permission.clone(),
            version: info.version.clone(),
            timeout: info.timeout,
        };
        // Root accounts predate this call and are never dropped as cleanup
        let undo = if root::is_root(&info.username) {
            Undo::Nothing
        } else {
            Undo::Users
        };
        self.create_user(&create, undo).await?;

        self.exec("flush privileges", "", CLEANUP_TIMEOUT_SECS).await
    }
}

/// `grant all privileges` on one database, or on everything for `*`.
fn grant_all(database: &str, identity: &Identity) -> String {
    if database == ALL_DATABASES {
        format!("grant all privileges on *.* to {}", identity)
    } else {
        format!("grant all privileges on `{}`.* to {}", database, identity)
    }
}
