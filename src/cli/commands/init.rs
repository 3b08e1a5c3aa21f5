use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::path::{Path, PathBuf};

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (unless it exists or `--test` is set)
///  - the SQLite schema
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cfg_path = cli
        .config
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_file);

    if !cli.test && !cfg_path.exists() {
        cfg.save(&cfg_path)?;
        success(format!("Config file: {}", cfg_path.display()));
    } else {
        info(format!("Config file: {}", cfg_path.display()));
    }

    if let Some(dir) = Path::new(&cfg.database).parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    let pool = DbPool::new(&cfg.database);
    let conn = pool.get()?;
    init_db(&conn)?;

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
