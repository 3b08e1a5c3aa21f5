use crate::errors::{AppError, AppResult};
use crate::models::login::LoginRecord;
use crate::models::student::Student;
use crate::models::waiver::WaiverStatus;
use crate::utils::time::{TIMESTAMP_FORMAT, format_timestamp};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

// ---------------------------
// Students
// ---------------------------

pub fn map_student(row: &Row) -> Result<Student> {
    let waiver: Option<String> = row.get("waiver_signed")?;
    Ok(Student {
        student_id: row.get("student_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        waiver: WaiverStatus::from_db(waiver.as_deref()),
    })
}

pub fn find_student(conn: &Connection, student_id: &str) -> AppResult<Option<Student>> {
    let mut stmt = conn.prepare_cached(
        "SELECT student_id, first_name, last_name, waiver_signed
         FROM students WHERE student_id = ?1",
    )?;
    let student = stmt.query_row([student_id], map_student).optional()?;
    Ok(student)
}

/// Insert a student unless the id already exists. Returns `true` when a row was added.
pub fn insert_student(conn: &Connection, s: &Student) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO students (student_id, first_name, last_name, waiver_signed)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    let changed = stmt.execute(params![
        s.student_id,
        s.first_name,
        s.last_name,
        s.waiver.to_db_str(),
    ])?;
    Ok(changed == 1)
}

pub fn count_students(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
    Ok(n)
}

pub fn load_students(conn: &Connection) -> AppResult<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT student_id, first_name, last_name, waiver_signed
         FROM students ORDER BY student_id ASC",
    )?;
    let rows = stmt.query_map([], map_student)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Login records
// ---------------------------

fn parse_optional_ts(idx: usize, raw: Option<String>) -> Result<Option<NaiveDateTime>> {
    match raw {
        None => Ok(None),
        Some(s) => NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT)
            .map(Some)
            .map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(AppError::InvalidTimestamp(s.clone())),
                )
            }),
    }
}

pub fn map_login(row: &Row) -> Result<LoginRecord> {
    let login_raw: Option<String> = row.get("login_time")?;
    let logout_raw: Option<String> = row.get("logout_time")?;

    Ok(LoginRecord {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        login_time: parse_optional_ts(2, login_raw)?,
        logout_time: parse_optional_ts(3, logout_raw)?,
    })
}

/// Most recent open session of a student; ties broken by the highest id.
pub fn find_open_session(conn: &Connection, student_id: &str) -> AppResult<Option<LoginRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, student_id, login_time, logout_time FROM logins
         WHERE student_id = ?1 AND logout_time IS NULL
         ORDER BY id DESC LIMIT 1",
    )?;
    let rec = stmt.query_row([student_id], map_login).optional()?;
    Ok(rec)
}

/// Insert a new open session and return its id.
pub fn open_session(conn: &Connection, student_id: &str, at: NaiveDateTime) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO logins (student_id, login_time)
         VALUES (?1, ?2)",
    )?;
    stmt.execute(params![student_id, format_timestamp(at)])?;
    Ok(conn.last_insert_rowid())
}

/// Close a session by id. Only an open row is touched; returns rows changed.
pub fn close_session(conn: &Connection, id: i64, at: NaiveDateTime) -> AppResult<usize> {
    let mut stmt = conn.prepare_cached(
        "UPDATE logins SET logout_time = ?1
         WHERE id = ?2 AND logout_time IS NULL",
    )?;
    let changed = stmt.execute(params![format_timestamp(at), id])?;
    Ok(changed)
}

pub fn get_session(conn: &Connection, id: i64) -> AppResult<Option<LoginRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, student_id, login_time, logout_time FROM logins WHERE id = ?1",
    )?;
    let rec = stmt.query_row([id], map_login).optional()?;
    Ok(rec)
}

/// Filter for [`list_sessions`].
#[derive(Debug, Default, Clone)]
pub struct SessionFilter {
    pub student_id: Option<String>,
    pub open_only: bool,
}

pub fn list_sessions(conn: &Connection, filter: &SessionFilter) -> AppResult<Vec<LoginRecord>> {
    let mut sql = String::from("SELECT id, student_id, login_time, logout_time FROM logins");
    let mut clauses: Vec<&str> = Vec::new();
    let mut args: Vec<&dyn ToSql> = Vec::new();

    if let Some(id) = &filter.student_id {
        clauses.push("student_id = ?");
        args.push(id);
    }
    if filter.open_only {
        clauses.push("logout_time IS NULL");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(args.as_slice(), map_login)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
