//! Script-facing entry points.
//!
//! Scripts speak in raw cells: signed ids, packed `0xRRGGBBAA` colors and
//! `-1` for "no handle". These functions translate at the boundary and
//! never fail loudly; every outcome is a return value.

use glam::Vec2;
use widget_tween::{
    AnimHandle, Animation, AnimationKind, Clock, CompletionEvent, CompletionHandler, Easing,
    OwnerId, PropertyMask, PropertyTracks, Rgba, Scheduler, Span, TargetId,
};

/// Name of the public script callback invoked on completion.
pub const ON_ANIMATION_COMPLETE: &str = "OnWidgetAnimationComplete";

/// Arguments of the script-side create call, as raw cells.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawAnimation {
    pub owner: i32,
    pub target: i32,
    pub from_x: f32,
    pub from_y: f32,
    pub to_x: f32,
    pub to_y: f32,
    pub from_letter_x: f32,
    pub from_letter_y: f32,
    pub to_letter_x: f32,
    pub to_letter_y: f32,
    pub from_text_x: f32,
    pub from_text_y: f32,
    pub to_text_x: f32,
    pub to_text_y: f32,
    pub from_color: u32,
    pub to_color: u32,
    pub from_box_color: u32,
    pub to_box_color: u32,
    pub from_background: u32,
    pub to_background: u32,
    pub duration_ms: i32,
    pub easing: i32,
    pub mask: i32,
    pub kind: i32,
    pub silent: bool,
}

impl RawAnimation {
    /// Decode into a typed request. `None` if either id is negative.
    pub fn decode(&self) -> Option<Animation> {
        let owner = OwnerId(u32::try_from(self.owner).ok()?);
        let target = TargetId(u32::try_from(self.target).ok()?);
        let tracks = PropertyTracks {
            position: Span::new(Vec2::new(self.from_x, self.from_y), Vec2::new(self.to_x, self.to_y)),
            letter_size: Span::new(
                Vec2::new(self.from_letter_x, self.from_letter_y),
                Vec2::new(self.to_letter_x, self.to_letter_y),
            ),
            text_size: Span::new(
                Vec2::new(self.from_text_x, self.from_text_y),
                Vec2::new(self.to_text_x, self.to_text_y),
            ),
            color: Span::new(Rgba::from_u32(self.from_color), Rgba::from_u32(self.to_color)),
            box_color: Span::new(Rgba::from_u32(self.from_box_color), Rgba::from_u32(self.to_box_color)),
            background_color: Span::new(
                Rgba::from_u32(self.from_background),
                Rgba::from_u32(self.to_background),
            ),
        };

        let mut animation = Animation::new(owner, target, self.duration_ms, Easing::from_index(self.easing))
            .with_tracks(tracks, PropertyMask::from_bits_truncate(self.mask as u32))
            .with_kind(AnimationKind(self.kind));
        animation.silent = self.silent;
        Some(animation)
    }
}

/// Returns the new handle, or `-1` if the ids are invalid or the pool is full.
pub fn create<C: Clock>(scheduler: &mut Scheduler<C>, raw: &RawAnimation) -> i32 {
    let handle = raw.decode().and_then(|animation| scheduler.create(animation));
    AnimHandle::into_raw(handle)
}

pub fn stop<C: Clock>(scheduler: &mut Scheduler<C>, handle: i32) -> bool {
    AnimHandle::from_raw(handle).is_some_and(|h| scheduler.stop(h))
}

pub fn is_active<C: Clock>(scheduler: &Scheduler<C>, handle: i32) -> bool {
    AnimHandle::from_raw(handle).is_some_and(|h| scheduler.is_active(h))
}

/// Returns how many animations were stopped.
pub fn cleanup_owner<C: Clock>(scheduler: &mut Scheduler<C>, owner: i32, trigger_callbacks: bool) -> i32 {
    match u32::try_from(owner) {
        Ok(owner) => scheduler.cleanup_owner(OwnerId(owner), trigger_callbacks) as i32,
        Err(_) => 0,
    }
}

pub fn reset<C: Clock>(scheduler: &mut Scheduler<C>) {
    scheduler.reset();
}

/// Errors a script dispatcher can report for one callback.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("no loaded script defines public `{0}`")]
    MissingPublic(&'static str),

    #[error("public `{name}` aborted with code {code}")]
    Aborted { name: &'static str, code: i32 },
}

/// Completion handler that forwards events to a script dispatcher as
/// `(public name, [owner, handle, target, kind])`.
///
/// The dispatcher also receives the scheduler, so the script callback can
/// chain a new animation through [`create`].
pub struct ScriptSink<F> {
    call: F,
}

impl<F> ScriptSink<F> {
    pub fn new<C>(call: F) -> Self
    where
        C: Clock,
        F: FnMut(&mut Scheduler<C>, &'static str, [i32; CompletionEvent::CELLS]) -> Result<(), ScriptError>,
    {
        Self { call }
    }
}

impl<C, F> CompletionHandler<C> for ScriptSink<F>
where
    C: Clock,
    F: FnMut(&mut Scheduler<C>, &'static str, [i32; CompletionEvent::CELLS]) -> Result<(), ScriptError>,
{
    type Error = ScriptError;

    fn on_complete(&mut self, scheduler: &mut Scheduler<C>, event: CompletionEvent) -> Result<(), ScriptError> {
        (self.call)(scheduler, ON_ANIMATION_COMPLETE, event.to_cells())
    }
}
