pub mod checkin;
pub mod roster;
