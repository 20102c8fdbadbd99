//! Command-line and environment configuration.
//!
//! # Invariants
//! - Every path handed to core is absolute.

use clap::Parser;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "notebox";
const DB_FILE_NAME: &str = "notebox.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Parser)]
#[command(name = "notebox")]
#[command(about = "Create, inspect, edit and delete short notes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Storage file holding the persisted notes.
    #[arg(long, env = "NOTEBOX_DB", conflicts_with = "memory")]
    pub db: Option<PathBuf>,

    /// Directory for rolling log files.
    #[arg(long, env = "NOTEBOX_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "NOTEBOX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Keep notes in memory only; nothing is written to disk.
    #[arg(long)]
    pub memory: bool,
}

/// Where notes live for this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageTarget {
    File(PathBuf),
    Memory,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageTarget,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    pub fn resolve(cli: Cli) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let app_dir = dirs::data_dir()
            .unwrap_or_else(|| cwd.clone())
            .join(APP_DIR_NAME);
        Self::resolve_with(cli, &app_dir, &cwd)
    }

    fn resolve_with(cli: Cli, app_dir: &Path, cwd: &Path) -> Self {
        let absolute = |path: PathBuf| {
            if path.is_absolute() {
                path
            } else {
                cwd.join(path)
            }
        };

        let storage = if cli.memory {
            StorageTarget::Memory
        } else {
            StorageTarget::File(absolute(
                cli.db.unwrap_or_else(|| app_dir.join(DB_FILE_NAME)),
            ))
        };

        Self {
            storage,
            log_dir: absolute(cli.log_dir.unwrap_or_else(|| app_dir.join(LOG_DIR_NAME))),
            log_level: cli
                .log_level
                .unwrap_or_else(|| notebox_core::default_log_level().to_string()),
        }
    }
}
