pub mod analysis;
pub mod file_info;
pub mod record;
pub mod report;
pub mod user;
