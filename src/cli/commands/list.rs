use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::{SessionFilter, list_sessions};
use crate::errors::AppResult;
use crate::models::login::LoginRecord;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { open, student } = cmd {
        let pool = DbPool::new(&cfg.database);
        let conn = pool.get()?;
        init_db(&conn)?;

        let filter = SessionFilter {
            student_id: student.clone(),
            open_only: *open,
        };
        let rows = list_sessions(&conn, &filter)?;

        if rows.is_empty() {
            println!("No login records.");
            return Ok(());
        }
        print_sessions(&rows);
    }
    Ok(())
}

fn print_sessions(rows: &[LoginRecord]) {
    let id_w = rows
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);
    let student_w = rows
        .iter()
        .map(|r| r.student_id.len())
        .max()
        .unwrap_or(7)
        .max(7);

    println!(
        "{:>id_w$}  {:<student_w$}  {:<19}  {:<19}",
        "ID", "STUDENT", "LOGIN", "LOGOUT"
    );
    for r in rows {
        let logout = if r.is_open() {
            "(open)".to_string()
        } else {
            r.logout_str()
        };
        println!(
            "{:>id_w$}  {:<student_w$}  {:<19}  {:<19}",
            r.id,
            r.student_id,
            r.login_str(),
            logout
        );
    }
}
