pub mod directory;
pub(crate) mod pool;
pub mod scheduler;
pub mod stats;
pub mod time;
