pub mod config;
pub mod conversion;
pub mod drive;
pub mod errors;
pub mod local_path;
