//! Server connectivity preflight check.

use super::CheckResult;
use crate::core::executor::{ConnectOptions, MySqlExecutor, SqlExecutor};

/// Check that the server accepts the admin credentials.
pub async fn check(options: &ConnectOptions, timeout: u64) -> CheckResult {
    let name = format!("MySQL {}:{}", options.host, options.port);

    let executor = match MySqlExecutor::connect(options).await {
        Ok(executor) => executor,
        Err(e) => {
            return CheckResult::fail(
                &name,
                &format!("unreachable ({})", e),
                "Check --host/--port/--user or MYSQL_PWD",
            )
        }
    };

    let result = match executor.server_version(timeout).await {
        Ok(version) => CheckResult::ok(&name, &format!("reachable (version {})", version)),
        Err(_) => CheckResult::ok(&name, "reachable"),
    };
    executor.close().await;
    result
}
