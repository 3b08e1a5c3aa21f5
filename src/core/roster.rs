//! Roster import from the safety-training CSV export.
//!
//! Fixed column contract with the export (header row skipped):
//! 0 = last name, 1 = first name, 3 = student id, 10 = waiver flag.

use crate::db::queries::insert_student;
use crate::errors::{AppError, AppResult};
use crate::models::student::Student;
use crate::models::waiver::WaiverStatus;
use csv::{ReaderBuilder, StringRecord};
use rusqlite::Connection;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub const COL_LAST_NAME: usize = 0;
pub const COL_FIRST_NAME: usize = 1;
pub const COL_STUDENT_ID: usize = 3;
pub const COL_WAIVER: usize = 10;

/// Summary of one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub rows: usize,
    pub inserted: usize,
    pub skipped: usize,
}

pub struct RosterLoader;

impl RosterLoader {
    /// Import the roster file at `path`. A missing file is an error.
    pub fn import_file(conn: &mut Connection, path: &Path) -> AppResult<ImportReport> {
        let file = File::open(path)?;
        let report = Self::import_reader(conn, file)?;
        info!(
            path = %path.display(),
            rows = report.rows,
            inserted = report.inserted,
            skipped = report.skipped,
            "roster imported"
        );
        Ok(report)
    }

    /// Import from any CSV source. Runs in a single transaction: a malformed
    /// row aborts the whole import and nothing is written.
    pub fn import_reader<R: Read>(conn: &mut Connection, source: R) -> AppResult<ImportReport> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let columns = reader.headers()?.len();
        if columns == 0 {
            return Err(AppError::Roster {
                line: 1,
                reason: "missing header row".to_string(),
            });
        }
        if columns < COL_WAIVER + 1 {
            return Err(AppError::Roster {
                line: 1,
                reason: format!(
                    "header has {} columns, expected at least {}",
                    columns,
                    COL_WAIVER + 1
                ),
            });
        }

        let tx = conn.transaction()?;
        let mut report = ImportReport::default();

        for result in reader.records() {
            let record = result?;
            let student = parse_row(&record)?;

            report.rows += 1;
            if insert_student(&tx, &student)? {
                report.inserted += 1;
            } else {
                report.skipped += 1;
            }
        }

        tx.commit()?;
        Ok(report)
    }
}

fn cell<'a>(record: &'a StringRecord, idx: usize, line: u64) -> AppResult<&'a str> {
    record.get(idx).map(str::trim).ok_or_else(|| AppError::Roster {
        line,
        reason: format!(
            "expected at least {} columns, found {}",
            COL_WAIVER + 1,
            record.len()
        ),
    })
}

fn parse_row(record: &StringRecord) -> AppResult<Student> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    let student_id = cell(record, COL_STUDENT_ID, line)?;
    if student_id.is_empty() {
        return Err(AppError::Roster {
            line,
            reason: "empty student id".to_string(),
        });
    }

    Ok(Student::new(
        student_id,
        cell(record, COL_FIRST_NAME, line)?,
        cell(record, COL_LAST_NAME, line)?,
        WaiverStatus::from_raw(cell(record, COL_WAIVER, line)?),
    ))
}
