pub mod listing;
pub mod logging;
pub mod mirror;
