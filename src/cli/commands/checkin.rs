use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkin::CheckInLogic;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::time::now;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin { student_id } = cmd {
        let pool = DbPool::new(&cfg.database);
        let outcome = pool.with_conn(|conn| {
            init_db(conn)?;
            CheckInLogic::toggle(conn, student_id, now())
        })?;
        messages::outcome(&outcome);
    }
    Ok(())
}
