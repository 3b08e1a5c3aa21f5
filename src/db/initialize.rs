use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::{info, warn};

/// Create the schema if it does not exist yet. Safe to call at every start.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS students (
            student_id    TEXT PRIMARY KEY,
            first_name    TEXT NOT NULL,
            last_name     TEXT NOT NULL,
            waiver_signed TEXT
        );

        CREATE TABLE IF NOT EXISTS logins (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id  TEXT NOT NULL,
            login_time  TEXT,
            logout_time TEXT,
            FOREIGN KEY(student_id) REFERENCES students(student_id)
        );

        CREATE INDEX IF NOT EXISTS idx_logins_student ON logins(student_id, id);
        "#,
    )?;

    ensure_one_open_session_index(conn)?;
    info!("schema ready");
    Ok(())
}

/// Number of students that currently hold more than one open session.
pub fn students_with_duplicate_open_sessions(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM (
             SELECT student_id FROM logins
             WHERE logout_time IS NULL
             GROUP BY student_id
             HAVING COUNT(*) > 1
         )",
        [],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Back the one-open-session rule with a partial unique index.
///
/// Databases written by older kiosks may already contain duplicate open rows;
/// the index is skipped for those (returns `false`) and the toggle transaction
/// remains the only guard.
fn ensure_one_open_session_index(conn: &Connection) -> AppResult<bool> {
    let duplicates = students_with_duplicate_open_sessions(conn)?;
    if duplicates > 0 {
        warn!(
            duplicates,
            "students with more than one open session, skipping unique open-session index"
        );
        return Ok(false);
    }

    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_logins_one_open
             ON logins(student_id) WHERE logout_time IS NULL;",
    )?;
    Ok(true)
}
