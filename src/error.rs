//! Error types for the MySQL administration layer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Server error code for `create database` on an existing database.
pub const ER_DB_CREATE_EXISTS: u16 = 1007;

/// Server error code for a failed `create user` / `drop user` on an account.
pub const ER_CANNOT_USER: u16 = 1396;

/// Main error type for the MySQL administration layer.
#[derive(Error, Debug)]
pub enum Error {
    // Domain conflicts
    #[error("Database already exists: {0}")]
    DatabaseAlreadyExists(String),

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    // Timeout
    #[error("Execution timed out after {0}s")]
    ExecutionTimeout(u64),

    // Server errors
    #[error("ERROR {code}: {message}")]
    Server { code: u16, message: String },

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Unsupported character set: {0}")]
    UnsupportedCharset(String),

    // External tools
    #[error("{0} not found. Install the MySQL client: sudo apt install mysql-client")]
    ToolNotFound(String),

    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config errors
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Numeric MySQL error code, if the server reported one.
    pub fn server_code(&self) -> Option<u16> {
        match self {
            Error::Server { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether this error is the execution deadline expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::ExecutionTimeout(_))
    }
}

/// Lift driver errors that carry a MySQL error number into `Error::Server`.
pub fn from_sqlx(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db) = &err {
        if let Some(mysql) = db.try_downcast_ref::<sqlx::mysql::MySqlDatabaseError>() {
            return Error::Server {
                code: mysql.number(),
                message: db.message().to_string(),
            };
        }
    }
    Error::Sql(err)
}
