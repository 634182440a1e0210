//! Create and delete commands.

use super::open_session;
use crate::models::config::Config;
use crate::models::request::{CreateRequest, DeleteRequest};
use crate::Result;
use colored::Colorize;

/// Create a database and its user.
pub async fn create(
    config: &Config,
    server_version: Option<&str>,
    name: &str,
    charset: Option<&str>,
    username: &str,
    password: &str,
    permission: &str,
) -> Result<()> {
    let session = open_session(config, server_version).await?;
    let format = charset.unwrap_or(&config.defaults.charset);

    println!("{}", "[CREATE] Creating database...".bold().cyan());
    println!("  {} {}", "Database:".bold(), name);
    println!("  {} {}", "Charset:".bold(), format);
    println!("  {} {}@{}", "User:".bold(), username, permission);
    println!("  {} {}", "Server:".bold(), session.version);
    println!();

    let result = session
        .remote
        .create(&CreateRequest {
            name: name.to_string(),
            format: format.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            permission: permission.to_string(),
            version: session.version.clone(),
            timeout: session.timeout,
        })
        .await;
    session.remote.close().await;
    result?;

    println!("{}", "[OK] Database and user created".green());
    Ok(())
}

/// Drop a user and optionally its database.
pub async fn delete(
    config: &Config,
    server_version: Option<&str>,
    name: Option<&str>,
    username: &str,
    permission: &str,
    force: bool,
) -> Result<()> {
    let session = open_session(config, server_version).await?;

    println!("{}", "[DELETE] Dropping user...".bold().cyan());
    println!("  {} {}@{}", "User:".bold(), username, permission);
    if let Some(name) = name {
        println!("  {} {}", "Database:".bold(), name);
    }
    if force {
        println!("{}", "[WARNING] Failures will be ignored (--force)".yellow());
    }
    println!();

    let result = session
        .remote
        .delete(&DeleteRequest {
            name: name.unwrap_or_default().to_string(),
            username: username.to_string(),
            permission: permission.to_string(),
            version: session.version.clone(),
            force_delete: force,
            timeout: session.timeout,
        })
        .await;
    session.remote.close().await;
    result?;

    println!("{}", "[OK] Deleted".green());
    Ok(())
}
