use super::waiver::WaiverStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub student_id: String,   // ⇔ students.student_id (TEXT PRIMARY KEY)
    pub first_name: String,   // ⇔ students.first_name
    pub last_name: String,    // ⇔ students.last_name
    pub waiver: WaiverStatus, // ⇔ students.waiver_signed ("1" | "0" | legacy text)
}

impl Student {
    pub fn new(student_id: &str, first_name: &str, last_name: &str, waiver: WaiverStatus) -> Self {
        Self {
            student_id: student_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            waiver,
        }
    }

    /// "First Last", as shown on the kiosk.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
