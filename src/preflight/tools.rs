//! MySQL client tools preflight check.

use super::CheckResult;
use crate::services::dump;
use std::path::Path;

/// Check if a client binary is installed.
pub fn check(name: &str, binary: &Path) -> CheckResult {
    if dump::is_installed(binary) {
        match dump::get_version(binary) {
            Ok(version) => CheckResult::ok(name, &format!("installed ({})", version)),
            Err(_) => CheckResult::ok(name, "installed"),
        }
    } else {
        CheckResult::fail(
            name,
            &format!("not found ({})", binary.display()),
            "Install the MySQL client: sudo apt install mysql-client",
        )
    }
}
