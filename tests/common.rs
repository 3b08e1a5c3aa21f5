#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use bridgetroll::db::initialize::init_db;
use bridgetroll::db::pool::DbPool;
use bridgetroll::db::queries::insert_student;
use bridgetroll::models::student::Student;
use bridgetroll::models::waiver::WaiverStatus;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ROSTER_HEADER: &str =
    "Last Name,First Name,Username,Student ID,Last Access,Availability,Score,Attempts,Status,Started,Waiver\n";

pub fn kiosk() -> Command {
    cargo_bin_cmd!("bridgetroll")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_bridgetroll.db", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Config path that never exists, so tests never read the user's config
pub fn no_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_absent_bridgetroll.conf", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn roster_row(last: &str, first: &str, id: &str, waiver: &str) -> String {
    format!("{last},{first},{first}.{last},{id},2026-01-22,Yes,100,1,Completed,2026-01-20,{waiver}\n")
}

/// Write a roster CSV with the given rows into the temp dir
pub fn write_roster(name: &str, rows: &[String]) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_roster.csv", name));
    let mut content = ROSTER_HEADER.to_string();
    for r in rows {
        content.push_str(r);
    }
    fs::write(&path, content).expect("write roster");
    path.to_string_lossy().to_string()
}

/// Default roster: Alice signed, Bob unsigned ("0"), Carol unsigned (empty)
pub fn default_roster(name: &str) -> String {
    write_roster(
        name,
        &[
            roster_row("Smith", "Alice", "12345", "1"),
            roster_row("Jones", "Bob", "222", "0"),
            roster_row("Brown", "Carol", "333", ""),
        ],
    )
}

/// Fresh database with the schema and the default students, through the library API
pub fn seeded_pool(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path);
    let conn = pool.get().expect("open db");
    init_db(&conn).expect("init db");
    for s in [
        Student::new("12345", "Alice", "Smith", WaiverStatus::Signed),
        Student::new("222", "Bob", "Jones", WaiverStatus::Unsigned),
    ] {
        insert_student(&conn, &s).expect("insert student");
    }
    pool
}
