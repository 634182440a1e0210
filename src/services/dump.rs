//! Dump/restore through the MySQL client binaries.

use crate::models::source::DataSource;
use crate::{Error, Result};
use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Produces and consumes plain-text SQL scripts.
#[async_trait]
pub trait DumpTool: Send + Sync {
    /// Write schema and rows of `source.database` into `out`.
    async fn dump(&self, source: &DataSource, out: File) -> Result<()>;

    /// Apply the script read from `input` to `source.database`.
    async fn restore(&self, source: &DataSource, input: File) -> Result<()>;
}

/// `DumpTool` backed by `mysqldump` and `mysql`.
#[derive(Debug, Clone)]
pub struct MysqlClientTool {
    mysqldump: PathBuf,
    mysql: PathBuf,
}

impl MysqlClientTool {
    pub fn new(mysqldump: impl Into<PathBuf>, mysql: impl Into<PathBuf>) -> Self {
        Self {
            mysqldump: mysqldump.into(),
            mysql: mysql.into(),
        }
    }

    /// Common connection arguments. The password goes through `MYSQL_PWD`.
    fn command(binary: &Path, source: &DataSource) -> Command {
        let mut command = Command::new(binary);
        command
            .arg(format!("--host={}", source.host))
            .arg(format!("--port={}", source.port))
            .arg(format!("--user={}", source.user))
            .arg(format!("--default-character-set={}", source.charset))
            .env("MYSQL_PWD", &source.password)
            .stderr(Stdio::piped());
        command
    }

    async fn run(binary: &Path, mut command: Command) -> Result<()> {
        let tool = binary.display().to_string();
        let child = command.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ToolNotFound(tool.clone()),
            _ => Error::Io(e),
        })?;

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ToolFailed {
                tool,
                message: stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MysqlClientTool {
    fn default() -> Self {
        Self::new("mysqldump", "mysql")
    }
}

#[async_trait]
impl DumpTool for MysqlClientTool {
    async fn dump(&self, source: &DataSource, out: File) -> Result<()> {
        tracing::debug!("Dumping {}", redacted_dsn(source));
        let mut command = Self::command(&self.mysqldump, source);
        command
            .args(["--single-transaction", "--routines", "--triggers"])
            .arg(&source.database)
            .stdin(Stdio::null())
            .stdout(Stdio::from(out));
        Self::run(&self.mysqldump, command).await
    }

    async fn restore(&self, source: &DataSource, input: File) -> Result<()> {
        tracing::debug!("Restoring into {}", redacted_dsn(source));
        let mut command = Self::command(&self.mysql, source);
        command
            .arg(&source.database)
            .stdin(Stdio::from(input))
            .stdout(Stdio::null());
        Self::run(&self.mysql, command).await
    }
}

/// Check if a client binary is installed.
pub fn is_installed(binary: &Path) -> bool {
    std::process::Command::new(binary)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Get a client binary's version line.
pub fn get_version(binary: &Path) -> Result<String> {
    let output = std::process::Command::new(binary).arg("--version").output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next().unwrap_or("unknown");

    Ok(first_line.trim().to_string())
}

fn redacted_dsn(source: &DataSource) -> String {
    DataSource {
        password: "******".to_string(),
        ..source.clone()
    }
    .dsn()
}
