// components/animation.rs
//
// Animation requests and the pool slot they are stored in.
//
// Usage:
//   let anim = Animation::new(owner, widget, 500, Easing::QuadOut)
//       .position(Vec2::ZERO, Vec2::new(320.0, 240.0))
//       .color(Rgba::TRANSPARENT, Rgba::WHITE)
//       .with_kind(AnimationKind(2));
//   let handle = scheduler.create(anim);

use std::ops::{BitOr, BitOrAssign};
use glam::Vec2;
use crate::api::traits::Target;
use crate::api::types::{AnimHandle, AnimationKind, CompletionEvent, OwnerId, TargetId};
use crate::color::Rgba;
use crate::easing::Easing;
use crate::interp::{lerp_color, lerp_vec2};

/// Bitset selecting which widget properties an animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PropertyMask(u8);

impl PropertyMask {
    pub const NONE: PropertyMask = PropertyMask(0);
    pub const POSITION: PropertyMask = PropertyMask(1 << 0);
    pub const LETTER_SIZE: PropertyMask = PropertyMask(1 << 1);
    pub const TEXT_SIZE: PropertyMask = PropertyMask(1 << 2);
    pub const COLOR: PropertyMask = PropertyMask(1 << 3);
    pub const BOX_COLOR: PropertyMask = PropertyMask(1 << 4);
    pub const BACKGROUND_COLOR: PropertyMask = PropertyMask(1 << 5);
    pub const ALL: PropertyMask = PropertyMask(0b11_1111);

    /// Build a mask from script bits, ignoring bits above the six properties.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        PropertyMask((bits & Self::ALL.0 as u32) as u8)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: PropertyMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for PropertyMask {
    type Output = PropertyMask;

    fn bitor(self, rhs: PropertyMask) -> PropertyMask {
        PropertyMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for PropertyMask {
    fn bitor_assign(&mut self, rhs: PropertyMask) {
        self.0 |= rhs.0;
    }
}

/// Start and end value of one animated property.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span<T> {
    pub from: T,
    pub to: T,
}

impl<T> Span<T> {
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }
}

/// Start/end values for all six animatable properties.
/// Only the ones flagged in the owning animation's mask are used.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PropertyTracks {
    pub position: Span<Vec2>,
    pub letter_size: Span<Vec2>,
    pub text_size: Span<Vec2>,
    pub color: Span<Rgba>,
    pub box_color: Span<Rgba>,
    pub background_color: Span<Rgba>,
}

/// A request to animate one widget.
#[derive(Debug, Clone)]
pub struct Animation {
    pub owner: OwnerId,
    pub target: TargetId,
    pub tracks: PropertyTracks,
    pub mask: PropertyMask,
    /// Negative durations are treated as zero.
    pub duration_ms: i32,
    pub easing: Easing,
    pub kind: AnimationKind,
    /// Silent animations never produce a completion event.
    pub silent: bool,
}

impl Animation {
    /// An animation with no properties flagged yet.
    pub fn new(owner: OwnerId, target: TargetId, duration_ms: i32, easing: Easing) -> Self {
        Self {
            owner,
            target,
            tracks: PropertyTracks::default(),
            mask: PropertyMask::NONE,
            duration_ms,
            easing,
            kind: AnimationKind::default(),
            silent: false,
        }
    }

    // -- Builder methods --

    pub fn position(mut self, from: Vec2, to: Vec2) -> Self {
        self.tracks.position = Span::new(from, to);
        self.mask |= PropertyMask::POSITION;
        self
    }

    pub fn letter_size(mut self, from: Vec2, to: Vec2) -> Self {
        self.tracks.letter_size = Span::new(from, to);
        self.mask |= PropertyMask::LETTER_SIZE;
        self
    }

    pub fn text_size(mut self, from: Vec2, to: Vec2) -> Self {
        self.tracks.text_size = Span::new(from, to);
        self.mask |= PropertyMask::TEXT_SIZE;
        self
    }

    pub fn color(mut self, from: Rgba, to: Rgba) -> Self {
        self.tracks.color = Span::new(from, to);
        self.mask |= PropertyMask::COLOR;
        self
    }

    pub fn box_color(mut self, from: Rgba, to: Rgba) -> Self {
        self.tracks.box_color = Span::new(from, to);
        self.mask |= PropertyMask::BOX_COLOR;
        self
    }

    pub fn background_color(mut self, from: Rgba, to: Rgba) -> Self {
        self.tracks.background_color = Span::new(from, to);
        self.mask |= PropertyMask::BACKGROUND_COLOR;
        self
    }

    /// Replace all tracks and the mask at once (script entry points pass both).
    pub fn with_tracks(mut self, tracks: PropertyTracks, mask: PropertyMask) -> Self {
        self.tracks = tracks;
        self.mask = mask;
        self
    }

    pub fn with_kind(mut self, kind: AnimationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }
}

/// One pool slot. Field values of an inactive slot are stale.
#[derive(Debug, Clone, Default)]
pub(crate) struct AnimationSlot {
    pub active: bool,
    pub silent: bool,
    pub owner: OwnerId,
    pub target: TargetId,
    pub kind: AnimationKind,
    pub tracks: PropertyTracks,
    pub mask: PropertyMask,
    pub start_ms: u64,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl AnimationSlot {
    pub fn populate(animation: Animation, start_ms: u64) -> Self {
        Self {
            active: true,
            silent: animation.silent,
            owner: animation.owner,
            target: animation.target,
            kind: animation.kind,
            tracks: animation.tracks,
            mask: animation.mask,
            start_ms,
            duration_ms: animation.duration_ms.max(0) as u32,
            easing: animation.easing,
        }
    }

    /// Normalized progress [0, 1]. Zero-duration animations are always done.
    pub fn progress(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            1.0
        } else {
            let elapsed = now_ms.saturating_sub(self.start_ms);
            (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0) as f32
        }
    }

    /// Write every flagged property at the eased fraction. Unflagged
    /// properties are neither read nor written.
    pub fn apply<T: Target + ?Sized>(&self, eased: f32, target: &mut T) {
        let tracks = &self.tracks;
        if self.mask.contains(PropertyMask::POSITION) {
            target.set_position(lerp_vec2(tracks.position.from, tracks.position.to, eased));
        }
        if self.mask.contains(PropertyMask::LETTER_SIZE) {
            target.set_letter_size(lerp_vec2(tracks.letter_size.from, tracks.letter_size.to, eased));
        }
        if self.mask.contains(PropertyMask::TEXT_SIZE) {
            target.set_text_size(lerp_vec2(tracks.text_size.from, tracks.text_size.to, eased));
        }
        if self.mask.contains(PropertyMask::COLOR) {
            target.set_color(lerp_color(tracks.color.from, tracks.color.to, eased));
        }
        if self.mask.contains(PropertyMask::BOX_COLOR) {
            target.set_box_color(lerp_color(tracks.box_color.from, tracks.box_color.to, eased));
        }
        if self.mask.contains(PropertyMask::BACKGROUND_COLOR) {
            target.set_background_color(lerp_color(
                tracks.background_color.from,
                tracks.background_color.to,
                eased,
            ));
        }
    }

    pub fn completion_event(&self, handle: AnimHandle) -> CompletionEvent {
        CompletionEvent {
            owner: self.owner,
            handle,
            target: self.target,
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_mask_bits() {
        let anim = Animation::new(OwnerId(1), TargetId(2), 100, Easing::Linear)
            .position(Vec2::ZERO, Vec2::ONE)
            .box_color(Rgba::TRANSPARENT, Rgba::WHITE);
        assert!(anim.mask.contains(PropertyMask::POSITION));
        assert!(anim.mask.contains(PropertyMask::BOX_COLOR));
        assert!(!anim.mask.contains(PropertyMask::COLOR));
        assert_eq!(anim.mask.bits(), 0b01_0001);
    }

    #[test]
    fn mask_truncates_unknown_bits() {
        assert_eq!(PropertyMask::from_bits_truncate(0xFFFF_FFFF), PropertyMask::ALL);
        assert!(PropertyMask::from_bits_truncate(0x40).is_empty());
    }

    #[test]
    fn negative_duration_clamps_to_zero() {
        let anim = Animation::new(OwnerId(1), TargetId(1), -250, Easing::Linear);
        let slot = AnimationSlot::populate(anim, 1_000);
        assert_eq!(slot.duration_ms, 0);
        assert_eq!(slot.progress(1_000), 1.0);
    }

    #[test]
    fn progress_is_clamped() {
        let anim = Animation::new(OwnerId(1), TargetId(1), 1_000, Easing::Linear);
        let slot = AnimationSlot::populate(anim, 5_000);
        assert_eq!(slot.progress(4_000), 0.0);
        assert!((slot.progress(5_250) - 0.25).abs() < 1e-6);
        assert_eq!(slot.progress(9_000), 1.0);
    }
}
