//! Host-side contracts the scheduler drives.
//!
//! The scheduler never stores references to owners or widgets. Every tick it
//! resolves ids through a [`Directory`], writes through [`Target`] setters
//! and hands finished animations to a [`CompletionSink`] or, when the
//! callback needs to start follow-up animations, a [`CompletionHandler`].

use glam::Vec2;
use crate::api::types::{CompletionEvent, OwnerId, TargetId};
use crate::color::Rgba;
use crate::core::scheduler::Scheduler;
use crate::core::time::Clock;

/// A widget whose properties can be animated.
///
/// Setters only stage values; `commit` makes them visible to the client.
/// The scheduler calls only the setters of flagged properties and calls
/// `commit` at most once per widget per tick.
pub trait Target {
    fn set_position(&mut self, pos: Vec2);
    fn set_letter_size(&mut self, size: Vec2);
    fn set_text_size(&mut self, size: Vec2);
    fn set_color(&mut self, color: Rgba);
    fn set_box_color(&mut self, color: Rgba);
    fn set_background_color(&mut self, color: Rgba);
    /// Push staged property changes to the client.
    fn commit(&mut self);
}

/// A resolved owner entity, able to look up its widgets.
pub trait Owner {
    type Target: Target;

    /// Absence is a normal outcome (the widget was destroyed).
    fn resolve_target(&mut self, id: TargetId) -> Option<&mut Self::Target>;
}

/// The host's entity directory. Called for every active animation every
/// tick, so lookups should be cheap.
pub trait Directory {
    type Owner: Owner;

    /// Absence is a normal outcome (the owner disconnected).
    fn resolve_owner(&mut self, id: OwnerId) -> Option<&mut Self::Owner>;
}

/// Receiver of completion notifications, e.g. a script callback dispatcher.
pub trait CompletionSink {
    type Error;

    fn on_complete(&mut self, event: CompletionEvent) -> Result<(), Self::Error>;
}

/// Collects events in order. Useful for tests and for hosts that forward
/// completions in bulk.
impl CompletionSink for Vec<CompletionEvent> {
    type Error = std::convert::Infallible;

    fn on_complete(&mut self, event: CompletionEvent) -> Result<(), Self::Error> {
        self.push(event);
        Ok(())
    }
}

/// Receiver of completion notifications that gets the scheduler back.
///
/// The scheduler is not borrowed by the drain while `on_complete` runs, so
/// the handler may create, stop or query animations. Animations created here
/// are first visited on the next tick.
pub trait CompletionHandler<C: Clock> {
    type Error;

    fn on_complete(
        &mut self,
        scheduler: &mut Scheduler<C>,
        event: CompletionEvent,
    ) -> Result<(), Self::Error>;
}
