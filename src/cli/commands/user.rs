//! Password and access commands.

use super::open_session;
use crate::core::root;
use crate::models::config::Config;
use crate::models::request::{AccessChangeRequest, PasswordChangeRequest};
use crate::Result;
use colored::Colorize;

/// Change a user's password.
pub async fn change_password(
    config: &Config,
    server_version: Option<&str>,
    username: &str,
    password: &str,
    permission: &str,
) -> Result<()> {
    let session = open_session(config, server_version).await?;

    println!("{}", "[PASSWORD] Changing password...".bold().cyan());
    println!("  {} {}", "User:".bold(), username);
    println!();

    let result = session
        .remote
        .change_password(&PasswordChangeRequest {
            username: username.to_string(),
            password: password.to_string(),
            permission: permission.to_string(),
            version: session.version.clone(),
            timeout: session.timeout,
        })
        .await;
    session.remote.close().await;
    result?;

    println!("{}", "[OK] Password changed".green());
    Ok(())
}

/// Move a user to a new host scope.
pub async fn change_access(
    config: &Config,
    server_version: Option<&str>,
    name: Option<&str>,
    username: &str,
    password: &str,
    permission: &str,
    old_permission: &str,
) -> Result<()> {
    let name = root::access_database(username, name)?;
    let session = open_session(config, server_version).await?;

    println!("{}", "[ACCESS] Changing access...".bold().cyan());
    println!("  {} {}", "User:".bold(), username);
    println!("  {} {} -> {}", "Hosts:".bold(), old_permission, permission);
    println!();

    let result = session
        .remote
        .change_access(&AccessChangeRequest {
            name,
            username: username.to_string(),
            password: password.to_string(),
            permission: permission.to_string(),
            old_permission: old_permission.to_string(),
            version: session.version.clone(),
            timeout: session.timeout,
        })
        .await;
    session.remote.close().await;
    result?;

    println!("{}", "[OK] Access changed".green());
    Ok(())
}
