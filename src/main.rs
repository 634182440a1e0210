//! MySQL Admin CLI
//!
//! A command-line tool for administering remote MySQL servers.

use clap::Parser;
use mysql_admin::cli::{
    args::{Cli, Commands},
    commands::{backup, database, user},
};
use mysql_admin::models::config::{self, Config};
use mysql_admin::preflight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let version = cli.server_version.as_deref();

    // Run the appropriate command
    match cli.command {
        Commands::Create {
            ref name,
            ref charset,
            ref username,
            ref user_password,
            ref permission,
        } => {
            database::create(
                &config,
                version,
                name,
                charset.as_deref(),
                username,
                user_password,
                permission,
            )
            .await?;
        }

        Commands::Delete {
            ref name,
            ref username,
            ref permission,
            force,
        } => {
            database::delete(&config, version, name.as_deref(), username, permission, force)
                .await?;
        }

        Commands::Password {
            ref username,
            ref new_password,
            ref permission,
        } => {
            user::change_password(&config, version, username, new_password, permission).await?;
        }

        Commands::Access {
            ref name,
            ref username,
            ref new_password,
            ref permission,
            ref old_permission,
        } => {
            user::change_access(
                &config,
                version,
                name.as_deref(),
                username,
                new_password,
                permission,
                old_permission,
            )
            .await?;
        }

        Commands::Backup {
            ref name,
            ref charset,
            ref dir,
        } => {
            if !cli.skip_preflight {
                run_preflight_checks(&config).await?;
            }
            backup::backup(&config, version, name, charset.as_deref(), dir.as_deref()).await?;
        }

        Commands::Restore {
            ref name,
            ref file,
            ref charset,
        } => {
            if !cli.skip_preflight {
                run_preflight_checks(&config).await?;
            }
            backup::restore(&config, version, name, file, charset.as_deref()).await?;
        }

        Commands::Check => {
            run_preflight_checks(&config).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("mysql_admin=debug")
    } else {
        EnvFilter::new("mysql_admin=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Load the config file, then apply command line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => config::load_config_from(path)?,
        None => config::load_config(),
    };
    config.server.apply_env();

    if let Some(ref host) = cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref user) = cli.user {
        config.server.user = user.clone();
    }
    if let Some(ref password) = cli.password {
        config.server.password = password.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.defaults.timeout_secs = timeout;
    }

    Ok(config)
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config).await?;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
