use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::RosterLoader;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::web::{self, state::AppState};
use std::path::Path;
use tracing::info;

/// Boot sequence: schema, roster import (fatal on failure), HTTP server.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve {
        bind,
        roster,
        skip_import,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database);

        {
            let mut conn = pool.get()?;
            init_db(&conn)?;

            if *skip_import {
                info!("Roster import skipped");
            } else {
                let roster = roster.as_deref().unwrap_or(&cfg.roster);
                RosterLoader::import_file(&mut conn, Path::new(roster))?;
            }
        }

        let addr = bind.as_deref().unwrap_or(&cfg.bind);
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(web::serve(AppState::new(pool), addr))?;
    }
    Ok(())
}
