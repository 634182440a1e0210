//! Account identity model.

use std::fmt;

/// Separator between host patterns in a permission scope.
const SCOPE_SEPARATOR: char = ',';

/// A single `'user'@'host'` account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub host: String,
}

impl Identity {
    pub fn new(user: &str, host: &str) -> Self {
        Self {
            user: user.to_string(),
            host: host.to_string(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'@'{}'", self.user, self.host)
    }
}

/// Expand a permission scope into the identities it names.
///
/// A scope containing `,` is split into host patterns, dropping empty
/// segments. Anything else is used verbatim as a single host pattern, even
/// an empty string. Order is preserved and duplicates are kept.
pub fn expand_identities(username: &str, permission_scope: &str) -> Vec<Identity> {
    if permission_scope.contains(SCOPE_SEPARATOR) {
        permission_scope
            .split(SCOPE_SEPARATOR)
            .filter(|host| !host.is_empty())
            .map(|host| Identity::new(username, host))
            .collect()
    } else {
        vec![Identity::new(username, permission_scope)]
    }
}
