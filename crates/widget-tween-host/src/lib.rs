pub mod natives;
pub mod runner;

pub use natives::{RawAnimation, ScriptError, ScriptSink, ON_ANIMATION_COMPLETE};
pub use runner::SchedulerRunner;
