pub mod auth;
pub mod format;
pub mod logging;
pub mod models;
pub mod records;
pub mod remember;
pub mod seed;
pub mod stats;
pub mod table;
