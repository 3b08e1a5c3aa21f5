//! Check-in toggle: the kiosk's only decision.
//!
//! Per student the state is either "no open session" or "one open session";
//! every accepted scan flips it. Lookup, waiver gate and the open/close write
//! run inside one `BEGIN IMMEDIATE` transaction, so two scans of the same card
//! can never both observe "no open session".

use crate::db::queries::{close_session, find_open_session, find_student, open_session};
use crate::errors::AppResult;
use crate::models::student::Student;
use crate::utils::time::format_timestamp;
use chrono::NaiveDateTime;
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;
use tracing::{info, warn};

pub const MSG_NOT_FOUND: &str = "Student ID not found";

/// Result of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    NotFound,
    WaiverBlocked {
        student: Student,
    },
    CheckedIn {
        student: Student,
        record_id: i64,
        at: NaiveDateTime,
    },
    CheckedOut {
        student: Student,
        record_id: i64,
        at: NaiveDateTime,
    },
}

impl CheckInOutcome {
    /// User-facing kiosk message.
    pub fn message(&self) -> String {
        match self {
            CheckInOutcome::NotFound => MSG_NOT_FOUND.to_string(),
            CheckInOutcome::WaiverBlocked { student } => {
                format!("{} cannot check in - liability waiver", student.full_name())
            }
            CheckInOutcome::CheckedIn { student, at, .. } => {
                format!("{} checked IN at {}", student.full_name(), format_timestamp(*at))
            }
            CheckInOutcome::CheckedOut { student, at, .. } => {
                format!("{} checked OUT at {}", student.full_name(), format_timestamp(*at))
            }
        }
    }

    /// Whether the scan changed the attendance state.
    pub fn is_toggle(&self) -> bool {
        matches!(
            self,
            CheckInOutcome::CheckedIn { .. } | CheckInOutcome::CheckedOut { .. }
        )
    }
}

/// JSON body returned to the kiosk page.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInMessage {
    pub message: String,
}

impl From<&CheckInOutcome> for CheckInMessage {
    fn from(outcome: &CheckInOutcome) -> Self {
        Self {
            message: outcome.message(),
        }
    }
}

pub struct CheckInLogic;

impl CheckInLogic {
    /// Toggle the attendance state of `student_id` at time `now`.
    pub fn toggle(
        conn: &mut Connection,
        student_id: &str,
        now: NaiveDateTime,
    ) -> AppResult<CheckInOutcome> {
        let student_id = student_id.trim();
        if student_id.is_empty() {
            info!("empty student id submitted");
            return Ok(CheckInOutcome::NotFound);
        }

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(student) = find_student(&tx, student_id)? else {
            info!(student_id, "unknown student id");
            return Ok(CheckInOutcome::NotFound);
        };

        if !student.waiver.is_signed() {
            warn!(student_id, waiver = ?student.waiver, "check-in blocked by liability waiver");
            return Ok(CheckInOutcome::WaiverBlocked { student });
        }

        let outcome = match find_open_session(&tx, student_id)? {
            Some(open) => {
                close_session(&tx, open.id, now)?;
                info!(student_id, record_id = open.id, "checked out");
                CheckInOutcome::CheckedOut {
                    student,
                    record_id: open.id,
                    at: now,
                }
            }
            None => {
                let record_id = open_session(&tx, student_id, now)?;
                info!(student_id, record_id, "checked in");
                CheckInOutcome::CheckedIn {
                    student,
                    record_id,
                    at: now,
                }
            }
        };

        tx.commit()?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::{SessionFilter, get_session, insert_student, list_sessions};
    use crate::models::waiver::WaiverStatus;
    use crate::utils::time::parse_timestamp;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        for (id, first, last, waiver) in [
            ("12345", "Alice", "Smith", WaiverStatus::Signed),
            ("222", "Bob", "Jones", WaiverStatus::Unsigned),
        ] {
            insert_student(&conn, &Student::new(id, first, last, waiver)).unwrap();
        }
        conn
    }

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    fn session_count(conn: &Connection) -> usize {
        list_sessions(conn, &SessionFilter::default()).unwrap().len()
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut conn = setup();
        let out = CheckInLogic::toggle(&mut conn, "99999", ts("2026-01-22T09:00:00")).unwrap();
        assert_eq!(out, CheckInOutcome::NotFound);
        assert_eq!(out.message(), "Student ID not found");
        assert!(!out.is_toggle());
        assert_eq!(session_count(&conn), 0);
    }

    #[test]
    fn blank_id_is_not_found() {
        let mut conn = setup();
        let out = CheckInLogic::toggle(&mut conn, "   ", ts("2026-01-22T09:00:00")).unwrap();
        assert_eq!(out, CheckInOutcome::NotFound);
    }

    #[test]
    fn unsigned_waiver_blocks_without_writing() {
        let mut conn = setup();
        for _ in 0..3 {
            let out = CheckInLogic::toggle(&mut conn, "222", ts("2026-01-22T09:00:00")).unwrap();
            assert_eq!(out.message(), "Bob Jones cannot check in - liability waiver");
        }
        assert_eq!(session_count(&conn), 0);
    }

    #[test]
    fn in_then_out_closes_the_same_record() {
        let mut conn = setup();

        let first = CheckInLogic::toggle(&mut conn, "12345", ts("2026-01-22T09:00:00")).unwrap();
        assert_eq!(first.message(), "Alice Smith checked IN at 2026-01-22T09:00:00");
        let CheckInOutcome::CheckedIn { record_id: in_id, .. } = first else {
            panic!("expected check-in, got {first:?}");
        };

        let second = CheckInLogic::toggle(&mut conn, "12345", ts("2026-01-22T11:15:30")).unwrap();
        assert_eq!(second.message(), "Alice Smith checked OUT at 2026-01-22T11:15:30");
        let CheckInOutcome::CheckedOut { record_id: out_id, .. } = second else {
            panic!("expected check-out, got {second:?}");
        };

        assert_eq!(in_id, out_id);
        assert_eq!(session_count(&conn), 1);
        let rec = get_session(&conn, in_id).unwrap().unwrap();
        assert_eq!(rec.login_str(), "2026-01-22T09:00:00");
        assert_eq!(rec.logout_str(), "2026-01-22T11:15:30");
    }

    #[test]
    fn scanned_id_is_trimmed() {
        let mut conn = setup();
        let out = CheckInLogic::toggle(&mut conn, " 12345\n", ts("2026-01-22T09:00:00")).unwrap();
        assert!(matches!(out, CheckInOutcome::CheckedIn { .. }));
    }

    #[test]
    fn alternating_scans_pair_up() {
        for n in 1..=7usize {
            let mut conn = setup();
            for i in 0..n {
                let at = ts("2026-01-22T09:00:00") + chrono::Duration::minutes(i as i64);
                CheckInLogic::toggle(&mut conn, "12345", at).unwrap();
            }

            let all = list_sessions(&conn, &SessionFilter::default()).unwrap();
            assert_eq!(all.len(), n.div_ceil(2), "n = {n}");

            let open = all.iter().filter(|r| r.is_open()).count();
            assert_eq!(open, n % 2, "n = {n}");
        }
    }

    #[test]
    fn checkout_picks_newest_open_session() {
        // legacy database: duplicate open rows and no unique index
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE students (
                student_id TEXT PRIMARY KEY, first_name TEXT NOT NULL,
                last_name TEXT NOT NULL, waiver_signed TEXT
            );
            CREATE TABLE logins (
                id INTEGER PRIMARY KEY AUTOINCREMENT, student_id TEXT NOT NULL,
                login_time TEXT, logout_time TEXT
            );
            INSERT INTO students VALUES ('12345', 'Alice', 'Smith', '1');
            INSERT INTO logins (student_id, login_time) VALUES ('12345', '2026-01-22T08:00:00');
            INSERT INTO logins (student_id, login_time) VALUES ('12345', '2026-01-22T08:00:00');
            "#,
        )
        .unwrap();
        init_db(&conn).unwrap();

        let out = CheckInLogic::toggle(&mut conn, "12345", ts("2026-01-22T09:00:00")).unwrap();
        let CheckInOutcome::CheckedOut { record_id, .. } = out else {
            panic!("expected check-out, got {out:?}");
        };
        assert_eq!(record_id, 2);
        assert!(get_session(&conn, 1).unwrap().unwrap().is_open());
    }

    #[test]
    fn outcome_serializes_as_message_body() {
        let body = serde_json::to_value(CheckInMessage::from(&CheckInOutcome::NotFound)).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Student ID not found" }));
    }
}
