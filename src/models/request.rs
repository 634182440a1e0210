//! Request models for lifecycle and backup operations.

use std::path::PathBuf;

/// Database name that grants on every database (`*.*`).
pub const ALL_DATABASES: &str = "*";

/// Host pattern matching any host.
pub const ANY_HOST: &str = "%";

/// The superuser account name.
pub const ROOT_USER: &str = "root";

/// Create a database plus an owning user.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    /// Database name, or `*` for a grant-only operation on all databases.
    pub name: String,
    /// Character set (e.g. `utf8mb4`).
    pub format: String,
    pub username: String,
    pub password: String,
    /// Comma-joined host patterns, or a single pattern.
    pub permission: String,
    /// Server version string as reported by the server.
    pub version: String,
    pub timeout: u64,
}

/// Drop users and optionally their database.
#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    /// Database to drop; empty skips the drop.
    pub name: String,
    pub username: String,
    pub permission: String,
    pub version: String,
    /// Ignore per-step failures and keep going.
    pub force_delete: bool,
    pub timeout: u64,
}

/// Change a user's password on every host it is scoped to.
#[derive(Debug, Clone, Default)]
pub struct PasswordChangeRequest {
    pub username: String,
    pub password: String,
    pub permission: String,
    pub version: String,
    pub timeout: u64,
}

/// Move a user from one host scope to another.
#[derive(Debug, Clone, Default)]
pub struct AccessChangeRequest {
    pub name: String,
    pub username: String,
    pub password: String,
    /// New host scope.
    pub permission: String,
    /// Host scope currently granted.
    pub old_permission: String,
    pub version: String,
    pub timeout: u64,
}

/// Dump a database into a directory.
#[derive(Debug, Clone, Default)]
pub struct BackupRequest {
    pub name: String,
    pub format: String,
    pub target_dir: PathBuf,
}

/// Load a dump (plain or compressed) into a database.
#[derive(Debug, Clone, Default)]
pub struct RestoreRequest {
    pub name: String,
    pub format: String,
    pub source_file: PathBuf,
}
