//! Handle to a remote MySQL server.

use crate::core::executor::{redact, SqlExecutor};
use crate::models::source::DataSource;
use crate::services::archive::{Archiver, GzArchiver};
use crate::services::dump::{DumpTool, MysqlClientTool};
use crate::Result;
use std::sync::Arc;

const DEFAULT_LOCATION: &str = "Asia/Shanghai";

/// An administrative session against one server.
///
/// Holds an open connection plus the admin credentials used to build
/// connection strings for dump/restore. Calls are not synchronized; the
/// caller serializes them.
pub struct Remote {
    pub(crate) executor: Arc<dyn SqlExecutor>,
    pub user: String,
    pub password: String,
    pub address: String,
    pub port: u16,
    pub(crate) location: String,
    pub(crate) dump_tool: Arc<dyn DumpTool>,
    pub(crate) archiver: Arc<dyn Archiver>,
}

impl Remote {
    /// Create a handle using the MySQL client tools and gzip archiving.
    pub fn new(
        executor: Arc<dyn SqlExecutor>,
        user: &str,
        password: &str,
        address: &str,
        port: u16,
    ) -> Self {
        Self {
            executor,
            user: user.to_string(),
            password: password.to_string(),
            address: address.to_string(),
            port,
            location: DEFAULT_LOCATION.to_string(),
            dump_tool: Arc::new(MysqlClientTool::default()),
            archiver: Arc::new(GzArchiver),
        }
    }

    /// Replace the dump/restore tool.
    pub fn with_dump_tool(mut self, dump_tool: Arc<dyn DumpTool>) -> Self {
        self.dump_tool = dump_tool;
        self
    }

    /// Replace the archiver.
    pub fn with_archiver(mut self, archiver: Arc<dyn Archiver>) -> Self {
        self.archiver = archiver;
        self
    }

    /// Set the time zone location placed in connection strings.
    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    /// Connection descriptor for `database` with the given character set.
    pub fn data_source(&self, database: &str, charset: &str) -> DataSource {
        DataSource {
            user: self.user.clone(),
            password: self.password.clone(),
            host: self.address.clone(),
            port: self.port,
            database: database.to_string(),
            charset: charset.to_string(),
            location: self.location.clone(),
        }
    }

    /// Run one statement, logging it with `secret` masked.
    pub(crate) async fn exec(&self, command: &str, secret: &str, timeout: u64) -> Result<()> {
        tracing::debug!("Executing: {}", redact(command, secret));
        self.executor.execute(command, timeout).await
    }

    /// Close the connection.
    pub async fn close(self) {
        self.executor.close().await;
    }
}
