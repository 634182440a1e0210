//! Root account policy.
//!
//! The `root` account is never managed through the caller's scope:
//!
//! - Password changes only touch the root accounts the server actually has
//!   on `%` and `localhost`. Other root hosts are left alone.
//! - Access changes always act on scope `%` and database `*`, whatever
//!   the caller passed. Other users must name the database they are moved with.
//! - An access change that moves root to a different scope only revokes
//!   the old scope. Root is never re-granted.
//! - A failed access change never rolls back root accounts, since they
//!   existed before the call. A failed create rolls back like any other user.

use crate::models::identity::Identity;
use crate::models::request::{AccessChangeRequest, ALL_DATABASES, ANY_HOST, ROOT_USER};
use crate::{Error, Result};

/// Root hosts whose password may be changed.
pub const PASSWORD_HOSTS: &[&str] = &[ANY_HOST, "localhost"];

/// Whether `username` is the superuser account.
pub fn is_root(username: &str) -> bool {
    username == ROOT_USER
}

/// Root identities eligible for a password change, from the hosts the server reports.
pub fn password_targets(hosts: &[String]) -> Vec<Identity> {
    hosts
        .iter()
        .filter(|host| PASSWORD_HOSTS.contains(&host.as_str()))
        .map(|host| Identity::new(ROOT_USER, host))
        .collect()
}

/// Pin a root access change to scope `%` on all databases.
pub fn pin_access_scope(info: &mut AccessChangeRequest) {
    if is_root(&info.username) {
        info.old_permission = ANY_HOST.to_string();
        info.name = ALL_DATABASES.to_string();
    }
}

/// Database an access change re-grants. Only root may omit it and get `*`.
pub fn access_database(username: &str, name: Option<&str>) -> Result<String> {
    match name {
        Some(name) => Ok(name.to_string()),
        None if is_root(username) => Ok(ALL_DATABASES.to_string()),
        None => Err(Error::other(format!(
            "a database name is required to move user {}",
            username
        ))),
    }
}
