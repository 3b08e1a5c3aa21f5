pub mod checkin;
pub mod import;
pub mod init;
pub mod list;
pub mod serve;
