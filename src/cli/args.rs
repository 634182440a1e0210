//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MySQL Admin - Manage databases, users and backups on a remote MySQL server
#[derive(Parser, Debug)]
#[command(name = "mysql-admin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Path to config.toml (default: ~/.config/mysql_admin/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Server host
    #[arg(short = 'H', long, global = true)]
    pub host: Option<String>,

    /// Server port
    #[arg(short = 'P', long, global = true)]
    pub port: Option<u16>,

    /// Admin user
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Admin password (prefer MYSQL_PWD)
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Per-statement timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Server version (e.g. 5.7.44, 8.0.32); detected when omitted
    #[arg(long, global = true)]
    pub server_version: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a database and a user owning it
    Create {
        /// Database name (* grants on all databases without creating one)
        #[arg(value_name = "NAME")]
        name: String,

        /// Character set: utf8, utf8mb4, gbk, big5
        #[arg(long)]
        charset: Option<String>,

        /// User to create
        #[arg(long)]
        username: String,

        /// Password for the new user
        #[arg(long)]
        user_password: String,

        /// Hosts the user may connect from, comma separated
        #[arg(long, default_value = "%")]
        permission: String,
    },

    /// Drop a user and optionally its database
    Delete {
        /// Database to drop
        #[arg(long)]
        name: Option<String>,

        /// User to drop
        #[arg(long)]
        username: String,

        /// Hosts the user is defined on, comma separated
        #[arg(long, default_value = "%")]
        permission: String,

        /// Keep going when a step fails
        #[arg(long)]
        force: bool,
    },

    /// Change a user's password
    Password {
        /// User whose password changes
        #[arg(long)]
        username: String,

        /// New password
        #[arg(long)]
        new_password: String,

        /// Hosts the user is defined on, comma separated (ignored for root)
        #[arg(long, default_value = "%")]
        permission: String,
    },

    /// Move a user to a different host scope
    Access {
        /// Database the user is granted (required unless moving root)
        #[arg(long)]
        name: Option<String>,

        /// User to move
        #[arg(long)]
        username: String,

        /// Password for the re-created user
        #[arg(long)]
        new_password: String,

        /// New hosts, comma separated
        #[arg(long)]
        permission: String,

        /// Current hosts, comma separated (ignored for root)
        #[arg(long, default_value = "%")]
        old_permission: String,
    },

    /// Dump a database to a timestamped .sql file plus .sql.gz
    Backup {
        /// Database name
        #[arg(value_name = "NAME")]
        name: String,

        /// Character set for the dump session
        #[arg(long)]
        charset: Option<String>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Restore a database from a .sql, .sql.gz or .tar.gz file
    Restore {
        /// Database name
        #[arg(value_name = "NAME")]
        name: String,

        /// Dump file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Character set for the restore session
        #[arg(long)]
        charset: Option<String>,
    },

    /// Run preflight checks only
    Check,
}
