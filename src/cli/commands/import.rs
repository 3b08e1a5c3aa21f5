use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::RosterLoader;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let roster = file.as_deref().unwrap_or(&cfg.roster);

        let pool = DbPool::new(&cfg.database);
        let mut conn = pool.get()?;
        init_db(&conn)?;

        let report = RosterLoader::import_file(&mut conn, Path::new(roster))?;
        success(format!(
            "Roster imported from {}: {} rows, {} new, {} already present",
            roster, report.rows, report.inserted, report.skipped
        ));
    }
    Ok(())
}
