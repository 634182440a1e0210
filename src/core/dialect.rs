//! Version-dependent SQL syntax.
//!
//! Servers reporting a `5.6` or `5.7` version speak the legacy account
//! syntax; everything else is treated as 8.x. The caller-supplied version
//! string is trusted as-is.

use crate::models::identity::Identity;

/// Version bucket selecting a statement dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// MySQL 5.6.
    Legacy56,
    /// MySQL 5.7.
    Legacy57,
    /// MySQL 8 and anything unrecognised.
    Modern,
}

/// Statement templates for one dialect.
#[derive(Debug)]
struct Templates {
    /// Appended to `grant ...` statements; `{password}` is substituted.
    grant_suffix: Option<&'static str>,
    /// `{identity}` is substituted.
    drop_user: &'static str,
    /// `{identity}` and `{password}` are substituted.
    change_password: &'static str,
}

const LEGACY_56: Templates = Templates {
    grant_suffix: Some(" identified by '{password}' with grant option;"),
    drop_user: "drop user {identity}",
    change_password: "set password for {identity} = password('{password}')",
};

// 5.7 accepts `drop user if exists`; only 5.6 lacks it.
const LEGACY_57: Templates = Templates {
    grant_suffix: Some(" identified by '{password}' with grant option;"),
    drop_user: "drop user if exists {identity}",
    change_password: "set password for {identity} = password('{password}')",
};

const MODERN: Templates = Templates {
    grant_suffix: None,
    drop_user: "drop user if exists {identity}",
    change_password: "alter user {identity} identified with mysql_native_password by '{password}';",
};

impl Dialect {
    /// Bucket a server version string.
    pub fn from_version(version: &str) -> Self {
        if version.starts_with("5.6") {
            Dialect::Legacy56
        } else if version.starts_with("5.7") {
            Dialect::Legacy57
        } else {
            Dialect::Modern
        }
    }

    fn templates(self) -> &'static Templates {
        match self {
            Dialect::Legacy56 => &LEGACY_56,
            Dialect::Legacy57 => &LEGACY_57,
            Dialect::Modern => &MODERN,
        }
    }

    /// Finish a `grant` statement for this dialect.
    pub fn grant_clause(self, base_grant: &str, password: &str) -> String {
        match self.templates().grant_suffix {
            Some(suffix) => format!("{}{}", base_grant, suffix.replace("{password}", password)),
            None => base_grant.to_string(),
        }
    }

    /// Statement dropping one account.
    pub fn drop_user_clause(self, identity: &Identity) -> String {
        self.templates()
            .drop_user
            .replace("{identity}", &identity.to_string())
    }

    /// Statement changing one account's password.
    pub fn password_clause(self, identity: &Identity, password: &str) -> String {
        self.templates()
            .change_password
            .replace("{identity}", &identity.to_string())
            .replace("{password}", password)
    }
}

/// Finish a `grant` statement for the given server version.
pub fn select_grant_clause(version: &str, base_grant: &str, password: &str) -> String {
    Dialect::from_version(version).grant_clause(base_grant, password)
}

/// Statement dropping one account on the given server version.
pub fn select_drop_user_clause(version: &str, identity: &Identity) -> String {
    Dialect::from_version(version).drop_user_clause(identity)
}

/// Statement changing one account's password on the given server version.
pub fn select_password_clause(version: &str, identity: &Identity, password: &str) -> String {
    Dialect::from_version(version).password_clause(identity, password)
}
