mod config;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use directory::DirectoryModule;
use sea_orm::{ConnectOptions, Database};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, DatabaseConfig, LogFormat, LoggingConfig};

#[derive(Parser)]
#[command(name = "directory-server")]
#[command(about = "Directory service: group permissions, memberships and contacts over HTTP")]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true, env = "DIRECTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Database URL (sqlite://path/to/directory.db?mode=rwc)
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Listen address, overrides `server.bind_addr`
    #[arg(long, global = true)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Start the HTTP server (default)
    Run,
    /// Print the effective configuration and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(cli.database_url, cli.bind);

    match cli.command.unwrap_or(Command::Run) {
        Command::CheckConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Command::Run => run(config).await,
    }
}

async fn run(config: AppConfig) -> Result<()> {
    init_logging(&config.logging)?;

    let addr: SocketAddr = config.server.bind_addr.parse().map_err(|e| {
        anyhow::anyhow!("Invalid bind address '{}': {e}", config.server.bind_addr)
    })?;

    let db = Database::connect(connect_options(&config.database))
        .await
        .with_context(|| format!("failed to connect to database '{}'", config.database.url))?;
    info!("Connected to database");

    let module = DirectoryModule::new(config.directory);
    module.init(db).await?;
    let router = module.router()?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Directory server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("Directory server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

fn init_logging(cfg: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match cfg.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

/// In-memory `SQLite` gives every pooled connection its own database, so the
/// pool is pinned to one connection there.
fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    if cfg.url.contains(":memory:") {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(cfg.max_connections);
    }
    opts.sqlx_logging(false);
    opts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::IntoFuture;

    #[test]
    fn test_cli_parses_subcommands_and_overrides() {
        let cli = Cli::try_parse_from([
            "directory-server",
            "check-config",
            "--bind",
            "127.0.0.1:0",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::CheckConfig)));
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1:0"));

        let cli = Cli::try_parse_from(["directory-server"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_memory_database_uses_single_connection() {
        let opts = connect_options(&DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
            max_connections: 8,
        });
        assert_eq!(opts.get_max_connections(), Some(1));

        let opts = connect_options(&DatabaseConfig::default());
        assert_eq!(opts.get_max_connections(), Some(5));
    }

    #[tokio::test]
    async fn test_serves_over_tcp() {
        let db = Database::connect(connect_options(&DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
            max_connections: 1,
        }))
        .await
        .unwrap();
        let module = DirectoryModule::new(directory::config::DirectoryConfig::default());
        module.init(db).await.unwrap();
        let router = module.router().unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(axum::serve(listener, router).into_future());

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        tokio::io::AsyncWriteExt::write_all(
            &mut stream,
            b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await
        .unwrap();
        let mut response = String::new();
        tokio::io::AsyncReadExt::read_to_string(&mut stream, &mut response)
            .await
            .unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.to_ascii_lowercase().contains("x-api-version: 1.0.0"));
    }
}
