pub mod api;
pub mod color;
pub mod components;
pub mod core;
pub mod easing;
pub mod interp;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, SchedulerConfig};
pub use api::traits::{CompletionHandler, CompletionSink, Directory, Owner, Target};
pub use api::types::{AnimHandle, AnimationKind, CompletionEvent, OwnerId, TargetId};
pub use color::Rgba;
pub use components::animation::{Animation, PropertyMask, PropertyTracks, Span};
pub use components::widget::{Widget, WidgetState};
pub use crate::core::directory::{MemoryDirectory, MemoryOwner};
pub use crate::core::scheduler::Scheduler;
pub use crate::core::stats::Stats;
pub use crate::core::time::{Clock, ManualClock, MonotonicClock, TickAccumulator};
pub use easing::Easing;
pub use interp::{lerp, lerp_color, lerp_vec2};
pub use systems::tick::TickReport;
