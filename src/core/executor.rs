//! SQL execution against the target server.
//!
//! Every call carries its own deadline. A call that outlives its deadline
//! is reported as `Error::ExecutionTimeout` no matter what the driver
//! returned; a call that fails before the deadline surfaces the driver
//! error unchanged.

use crate::error::from_sqlx;
use crate::{Error, Result};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use std::future::Future;
use std::time::{Duration, Instant};

/// Introspection query listing the host patterns of every root account.
pub const ROOT_HOSTS_QUERY: &str = "select host from mysql.user where user='root';";

/// Executes statements on the target server.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Run a single statement.
    async fn execute(&self, command: &str, timeout_secs: u64) -> Result<()>;

    /// Host patterns of all `root` accounts.
    async fn query_root_hosts(&self, timeout_secs: u64) -> Result<Vec<String>>;

    /// Release the underlying connection.
    async fn close(&self) {}
}

/// Run `fut` under a deadline.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let started = Instant::now();
    match tokio::time::timeout(deadline, fut).await {
        Err(_) => Err(Error::ExecutionTimeout(deadline.as_secs())),
        Ok(_) if started.elapsed() >= deadline => Err(Error::ExecutionTimeout(deadline.as_secs())),
        Ok(result) => result,
    }
}

/// Mask a quoted password so statements can be logged.
pub fn redact(command: &str, password: &str) -> String {
    if password.is_empty() {
        command.to_string()
    } else {
        command.replace(&format!("'{}'", password), "'******'")
    }
}

/// Connection settings for [`MySqlExecutor`].
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Seconds allowed for establishing the connection.
    pub connect_timeout: u64,
}

/// `SqlExecutor` over a single sqlx MySQL connection.
pub struct MySqlExecutor {
    pool: MySqlPool,
}

impl MySqlExecutor {
    /// Open a connection to the server.
    pub async fn connect(options: &ConnectOptions) -> Result<Self> {
        let connect = MySqlConnectOptions::new()
            .host(&options.host)
            .port(options.port)
            .username(&options.user)
            .password(&options.password);

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(options.connect_timeout))
            .connect_with(connect)
            .await
            .map_err(from_sqlx)?;

        tracing::debug!("Connected to {}:{}", options.host, options.port);
        Ok(Self { pool })
    }

    /// Version string reported by the server.
    pub async fn server_version(&self, timeout_secs: u64) -> Result<String> {
        with_deadline(Duration::from_secs(timeout_secs), async {
            sqlx::query_scalar::<_, String>("select version()")
                .fetch_one(&self.pool)
                .await
                .map_err(from_sqlx)
        })
        .await
    }
}

#[async_trait]
impl SqlExecutor for MySqlExecutor {
    async fn execute(&self, command: &str, timeout_secs: u64) -> Result<()> {
        with_deadline(Duration::from_secs(timeout_secs), async {
            // Text protocol: account statements are not all preparable.
            sqlx::raw_sql(command)
                .execute(&self.pool)
                .await
                .map(|_| ())
                .map_err(from_sqlx)
        })
        .await
    }

    async fn query_root_hosts(&self, timeout_secs: u64) -> Result<Vec<String>> {
        let rows = with_deadline(Duration::from_secs(timeout_secs), async {
            sqlx::query(ROOT_HOSTS_QUERY)
                .fetch_all(&self.pool)
                .await
                .map_err(from_sqlx)
        })
        .await?;

        Ok(rows.iter().filter_map(decode_host).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Decode the host column, skipping rows that are neither text nor UTF-8 bytes.
fn decode_host(row: &MySqlRow) -> Option<String> {
    if let Ok(host) = row.try_get::<String, _>(0) {
        return Some(host);
    }
    match row.try_get::<Vec<u8>, _>(0) {
        Ok(bytes) => String::from_utf8(bytes).ok(),
        Err(e) => {
            tracing::debug!("Skipping undecodable host row: {}", e);
            None
        }
    }
}
