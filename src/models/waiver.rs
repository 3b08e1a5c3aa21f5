
/// Liability waiver status of a student.
///
/// The roster export carries the flag as free text; it is normalized at
/// import time and stored as `"1"` / `"0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaiverStatus {
    Signed,
    Unsigned,
    /// Column is NULL (never written by the importer).
    Unknown,
}

impl WaiverStatus {
    /// Interpret a raw roster cell: empty or "0" means unsigned, anything else signed.
    pub fn from_raw(s: &str) -> Self {
        match s.trim() {
            "" | "0" => WaiverStatus::Unsigned,
            _ => WaiverStatus::Signed,
        }
    }

    /// Convert DB value → enum
    pub fn from_db(value: Option<&str>) -> Self {
        match value {
            Some(s) => Self::from_raw(s),
            None => WaiverStatus::Unknown,
        }
    }

    /// Convert enum → DB value
    pub fn to_db_str(&self) -> Option<&'static str> {
        match self {
            WaiverStatus::Signed => Some("1"),
            WaiverStatus::Unsigned => Some("0"),
            WaiverStatus::Unknown => None,
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, WaiverStatus::Signed)
    }
}
