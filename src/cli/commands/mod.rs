//! CLI command implementations.

pub mod backup;
pub mod database;
pub mod user;

use crate::core::executor::{ConnectOptions, MySqlExecutor};
use crate::core::Remote;
use crate::models::config::Config;
use crate::services::dump::MysqlClientTool;
use crate::Result;
use std::sync::Arc;

/// An open connection plus the settings commands need.
pub struct Session {
    pub remote: Remote,
    /// Server version used for dialect selection.
    pub version: String,
    pub timeout: u64,
}

/// Connect to the configured server.
///
/// The server version is asked from the server unless `server_version` is given.
pub async fn open_session(config: &Config, server_version: Option<&str>) -> Result<Session> {
    let timeout = config.defaults.timeout_secs;
    let executor = Arc::new(
        MySqlExecutor::connect(&ConnectOptions {
            host: config.server.host.clone(),
            port: config.server.port,
            user: config.server.user.clone(),
            password: config.server.password.clone(),
            connect_timeout: timeout,
        })
        .await?,
    );

    let version = match server_version {
        Some(v) => v.to_string(),
        None => executor.server_version(timeout).await?,
    };
    tracing::debug!("Server version: {}", version);

    let remote = Remote::new(
        executor,
        &config.server.user,
        &config.server.password,
        &config.server.host,
        config.server.port,
    )
    .with_dump_tool(Arc::new(MysqlClientTool::new(
        config.tools.mysqldump.clone(),
        config.tools.mysql.clone(),
    )))
    .with_location(&config.defaults.location);

    Ok(Session {
        remote,
        version,
        timeout,
    })
}
