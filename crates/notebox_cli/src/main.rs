//! Notebox terminal entry point.
//!
//! Resolves configuration, starts logging, loads the persisted notes, runs the
//! interactive shell, and writes the full snapshot back when the session ends.

mod config;
mod shell;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::{AppConfig, Cli, StorageTarget};
use log::info;
use notebox_core::db::open_db;
use notebox_core::{
    init_logging, KeyValueRepository, MemoryKeyValueRepository, NoteManager,
    SqliteKeyValueRepository, SystemClock,
};
use shell::Shell;
use std::io;

fn main() -> Result<()> {
    let config = AppConfig::resolve(Cli::parse());
    init_logging(&config.log_level, &config.log_dir)
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;

    match &config.storage {
        StorageTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create `{}`", parent.display()))?;
            }
            let conn = open_db(path)
                .with_context(|| format!("failed to open notes storage `{}`", path.display()))?;
            run_session(SqliteKeyValueRepository::new(&conn))
        }
        StorageTarget::Memory => run_session(MemoryKeyValueRepository::new()),
    }
}

fn run_session(store: impl KeyValueRepository) -> Result<()> {
    let mut manager = NoteManager::load(store, SystemClock);
    info!(
        "event=session_start module=cli status=ok core_version={} notes={}",
        notebox_core::core_version(),
        manager.notes().len()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let session = Shell::new(stdin.lock(), stdout.lock()).run(&mut manager);

    manager.persist().context("failed to save notes")?;
    info!(
        "event=session_end module=cli status=ok notes={}",
        manager.notes().len()
    );
    session.context("terminal i/o failed")
}
