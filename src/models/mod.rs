pub mod login;
pub mod student;
pub mod waiver;
