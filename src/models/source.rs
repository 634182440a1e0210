//! Connection descriptor handed to dump/restore tools.

/// Where a dump is taken from or restored into.
#[derive(Debug, Clone)]
pub struct DataSource {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    /// Character set for the session.
    pub charset: String,
    /// Time zone location, e.g. `Asia/Shanghai`.
    pub location: String,
}

impl DataSource {
    /// Render as `user:password@tcp(host:port)/database?charset=..&parseTime=true&loc=..`.
    pub fn dsn(&self) -> String {
        format!(
            "{}:{}@tcp({}:{})/{}?charset={}&parseTime=true&loc={}",
            self.user,
            self.password,
            self.host,
            self.port,
            self.database,
            self.charset,
            urlencoding::encode(&self.location)
        )
    }
}
