//! Backup and restore commands.

use super::open_session;
use crate::models::config::Config;
use crate::models::request::{BackupRequest, RestoreRequest};
use crate::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Dump a database.
pub async fn backup(
    config: &Config,
    server_version: Option<&str>,
    name: &str,
    charset: Option<&str>,
    dir: Option<&Path>,
) -> Result<()> {
    let session = open_session(config, server_version).await?;
    let target_dir = dir.unwrap_or(&config.defaults.backup_dir);

    println!("{}", "[BACKUP] Backing up database...".bold().cyan());
    println!("  {} {}", "Database:".bold(), name);
    println!("  {} {}", "Directory:".bold(), target_dir.display());
    println!();

    let pb = spinner(format!("Dumping {}", name));
    let result = session
        .remote
        .backup(&BackupRequest {
            name: name.to_string(),
            format: charset.unwrap_or(&config.defaults.charset).to_string(),
            target_dir: target_dir.to_path_buf(),
        })
        .await;
    pb.finish_and_clear();
    session.remote.close().await;
    let file_name = result?;

    println!("{} {}", "[OK] Backup saved to:".bold().green(), file_name.display());
    println!("     {}.gz", file_name.display());

    println!();
    println!("{}", "[Next Steps]".bold().yellow());
    println!(
        "  To restore: {}",
        format!("mysql-admin restore {} {}.gz", name, file_name.display()).cyan()
    );
    Ok(())
}

/// Restore a database from a dump file.
pub async fn restore(
    config: &Config,
    server_version: Option<&str>,
    name: &str,
    file: &Path,
    charset: Option<&str>,
) -> Result<()> {
    if !file.exists() {
        return Err(crate::Error::PathNotFound(file.display().to_string()));
    }

    let session = open_session(config, server_version).await?;

    println!("{}", "[RESTORE] Restoring database...".bold().cyan());
    println!("  {} {}", "Database:".bold(), name);
    println!("  {} {}", "Source:".bold(), file.display());
    println!();
    println!(
        "{}",
        "[WARNING] Statements are applied as-is; a failed restore is not rolled back!"
            .bold()
            .yellow()
    );
    println!();

    let pb = spinner(format!("Restoring {}", name));
    let result = session
        .remote
        .restore(&RestoreRequest {
            name: name.to_string(),
            format: charset.unwrap_or(&config.defaults.charset).to_string(),
            source_file: file.to_path_buf(),
        })
        .await;
    pb.finish_and_clear();
    session.remote.close().await;
    result?;

    println!("{}", "[OK] Restore completed".green());
    Ok(())
}
