pub mod config;
pub mod traits;
pub mod types;
