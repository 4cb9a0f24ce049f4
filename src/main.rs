//! Meal Statistics (mealstat)
//!
//! An MCP server for meal logging and nutrition statistics.

use std::path::PathBuf;

use mealstat::stats::StatsConfig;
use mealstat::{build_info, db, mcp::MealStatService};
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

/// Get the database path from environment or use default
fn get_database_path() -> PathBuf {
    std::env::var("MEALSTAT_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("mealstat.db");
            path
        })
}

/// Load statistics overrides from MEALSTAT_STATS_CONFIG, if set
fn load_stats_config() -> Result<StatsConfig, Box<dyn std::error::Error>> {
    match std::env::var("MEALSTAT_STATS_CONFIG") {
        Ok(path) => {
            let config = StatsConfig::from_json_file(&path)?;
            tracing::info!(path = %path, "Loaded statistics config");
            Ok(config)
        }
        Err(_) => Ok(StatsConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so stdout stays free for the MCP stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mealstat=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let db_path = get_database_path();
    tracing::info!(path = %db_path.display(), "Opening database");

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&db_path)?;

    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        tracing::info!(version, "Database schema ready");
        Ok(())
    })?;

    let config = load_stats_config()?;

    let service = MealStatService::new(db_path, database, config);

    tracing::info!("Starting MCP server on stdio");
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
