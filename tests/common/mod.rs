//! Test doubles: an in-memory server and a fake dump tool.

#![allow(dead_code)]

use async_trait::async_trait;
use mysql_admin::core::executor::SqlExecutor;
use mysql_admin::core::Remote;
use mysql_admin::models::source::DataSource;
use mysql_admin::services::dump::DumpTool;
use mysql_admin::{Error, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::sync::{Arc, Mutex};

/// Injected failure for statements starting with a prefix.
enum Failure {
    Server { code: u16, message: String },
    Timeout,
}

#[derive(Default)]
struct State {
    databases: BTreeSet<String>,
    users: BTreeSet<String>,
    root_hosts: Vec<String>,
    statements: Vec<String>,
    failures: Vec<(String, Failure)>,
}

/// Tracks databases and accounts the way a MySQL server would.
#[derive(Default)]
pub struct FakeServer {
    state: Mutex<State>,
}

impl FakeServer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_database(self: &Arc<Self>, name: &str) -> Arc<Self> {
        self.state.lock().unwrap().databases.insert(name.to_string());
        self.clone()
    }

    pub fn with_user(self: &Arc<Self>, identity: &str) -> Arc<Self> {
        self.state.lock().unwrap().users.insert(identity.to_string());
        self.clone()
    }

    pub fn with_root_hosts(self: &Arc<Self>, hosts: &[&str]) -> Arc<Self> {
        let mut state = self.state.lock().unwrap();
        for host in hosts {
            state.root_hosts.push(host.to_string());
            state.users.insert(format!("'root'@'{}'", host));
        }
        drop(state);
        self.clone()
    }

    /// Fail every statement starting with `prefix` with a server error.
    pub fn fail_on(self: &Arc<Self>, prefix: &str, code: u16, message: &str) -> Arc<Self> {
        self.state.lock().unwrap().failures.push((
            prefix.to_string(),
            Failure::Server {
                code,
                message: message.to_string(),
            },
        ));
        self.clone()
    }

    /// Time out every statement starting with `prefix`.
    pub fn timeout_on(self: &Arc<Self>, prefix: &str) -> Arc<Self> {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((prefix.to_string(), Failure::Timeout));
        self.clone()
    }

    pub fn statements(&self) -> Vec<String> {
        self.state.lock().unwrap().statements.clone()
    }

    pub fn has_database(&self, name: &str) -> bool {
        self.state.lock().unwrap().databases.contains(name)
    }

    pub fn has_user(&self, identity: &str) -> bool {
        self.state.lock().unwrap().users.contains(identity)
    }

    fn apply(state: &mut State, command: &str) -> Result<()> {
        if let Some(rest) = command.strip_prefix("create database ") {
            let name = backticked(rest);
            if !state.databases.insert(name.clone()) {
                return Err(server_error(
                    1007,
                    &format!("Can't create database '{}'; database exists", name),
                ));
            }
        } else if let Some(rest) = command.strip_prefix("drop database if exists ") {
            state.databases.remove(&backticked(rest));
        } else if let Some(rest) = command.strip_prefix("create user ") {
            let identity = rest.split(" identified").next().unwrap_or(rest).to_string();
            if !state.users.insert(identity.clone()) {
                return Err(server_error(
                    1396,
                    &format!("Operation CREATE USER failed for {}", identity),
                ));
            }
        } else if let Some(rest) = command.strip_prefix("drop user if exists ") {
            state.users.remove(rest.trim());
        } else if let Some(rest) = command.strip_prefix("drop user ") {
            if !state.users.remove(rest.trim()) {
                return Err(server_error(
                    1396,
                    &format!("Operation DROP USER failed for {}", rest.trim()),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SqlExecutor for FakeServer {
    async fn execute(&self, command: &str, timeout_secs: u64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.statements.push(command.to_string());

        for (prefix, failure) in &state.failures {
            if command.starts_with(prefix.as_str()) {
                return Err(match failure {
                    Failure::Server { code, message } => server_error(*code, message),
                    Failure::Timeout => Error::ExecutionTimeout(timeout_secs),
                });
            }
        }

        Self::apply(&mut state, command)
    }

    async fn query_root_hosts(&self, _timeout_secs: u64) -> Result<Vec<String>> {
        Ok(self.state.lock().unwrap().root_hosts.clone())
    }
}

fn server_error(code: u16, message: &str) -> Error {
    Error::Server {
        code,
        message: message.to_string(),
    }
}

fn backticked(s: &str) -> String {
    s.split('`').nth(1).unwrap_or_default().to_string()
}

/// Dump tool that writes a fixed script and records what it restores.
#[derive(Default)]
pub struct FakeDumpTool {
    pub script: String,
    pub fail_dump: bool,
    restored: Mutex<Vec<(String, String)>>,
    dumped: Mutex<Vec<String>>,
}

impl FakeDumpTool {
    pub fn new(script: &str) -> Arc<Self> {
        Arc::new(Self {
            script: script.to_string(),
            ..Default::default()
        })
    }

    pub fn failing(partial: &str) -> Arc<Self> {
        Arc::new(Self {
            script: partial.to_string(),
            fail_dump: true,
            ..Default::default()
        })
    }

    /// `(dsn, script)` for every restore performed.
    pub fn restored(&self) -> Vec<(String, String)> {
        self.restored.lock().unwrap().clone()
    }

    /// DSNs of every dump performed.
    pub fn dumped(&self) -> Vec<String> {
        self.dumped.lock().unwrap().clone()
    }
}

#[async_trait]
impl DumpTool for FakeDumpTool {
    async fn dump(&self, source: &DataSource, mut out: File) -> Result<()> {
        self.dumped.lock().unwrap().push(source.dsn());
        out.write_all(self.script.as_bytes())?;
        if self.fail_dump {
            return Err(Error::ToolFailed {
                tool: "mysqldump".to_string(),
                message: "Lost connection to MySQL server during query".to_string(),
            });
        }
        Ok(())
    }

    async fn restore(&self, source: &DataSource, mut input: File) -> Result<()> {
        let mut script = String::new();
        input.read_to_string(&mut script)?;
        self.restored.lock().unwrap().push((source.dsn(), script));
        Ok(())
    }
}

/// Handle over a fake server, as the `root` admin on 127.0.0.1:3306.
pub fn remote(server: &Arc<FakeServer>) -> Remote {
    Remote::new(server.clone(), "root", "adminpw", "127.0.0.1", 3306)
}
