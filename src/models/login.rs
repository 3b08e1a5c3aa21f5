use crate::utils::time::format_timestamp;
use chrono::NaiveDateTime;

/// One attendance session. `logout_time == None` means the session is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRecord {
    pub id: i64,
    pub student_id: String,
    pub login_time: Option<NaiveDateTime>,
    pub logout_time: Option<NaiveDateTime>,
}

impl LoginRecord {
    pub fn is_open(&self) -> bool {
        self.logout_time.is_none()
    }

    pub fn login_str(&self) -> String {
        self.login_time.map(format_timestamp).unwrap_or_default()
    }

    pub fn logout_str(&self) -> String {
        self.logout_time.map(format_timestamp).unwrap_or_default()
    }
}
