use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Identifier of the client entity (player session) that owns widgets.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct OwnerId(pub u32);

/// Identifier of a widget inside its owner's namespace.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Opaque tag passed through to the completion notification.
/// Only the caller that created the animation knows what it means.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct AnimationKind(pub i32);

/// Handle to an animation slot: the slot's index in the pool.
///
/// Stable while the animation is active. Once the slot is released the same
/// value may be handed out again by a later `create`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct AnimHandle(pub u32);

impl AnimHandle {
    /// Raw value handed to scripts when no slot could be allocated.
    pub const INVALID_RAW: i32 = -1;

    /// Interpret a raw script handle. Negative values are never valid.
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().map(AnimHandle)
    }

    /// Encode an allocation result for scripts, mapping failure to [`Self::INVALID_RAW`].
    pub fn into_raw(handle: Option<Self>) -> i32 {
        handle
            .and_then(|h| i32::try_from(h.0).ok())
            .unwrap_or(Self::INVALID_RAW)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Notification that a non-silent animation finished.
///
/// Laid out as four 32-bit cells so it can be handed to a script callback
/// as-is; see [`CompletionEvent::to_cells`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub owner: OwnerId,
    pub handle: AnimHandle,
    pub target: TargetId,
    pub kind: AnimationKind,
}

impl CompletionEvent {
    pub const CELLS: usize = 4;

    /// Script argument cells in callback order: owner, handle, target, kind.
    pub fn to_cells(self) -> [i32; Self::CELLS] {
        bytemuck::cast(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_handle_round_trip() {
        assert_eq!(AnimHandle::from_raw(-1), None);
        assert_eq!(AnimHandle::from_raw(7), Some(AnimHandle(7)));
        assert_eq!(AnimHandle::into_raw(None), AnimHandle::INVALID_RAW);
        assert_eq!(AnimHandle::into_raw(Some(AnimHandle(3))), 3);
    }

    #[test]
    fn event_cells_follow_callback_order() {
        let event = CompletionEvent {
            owner: OwnerId(4),
            handle: AnimHandle(12),
            target: TargetId(99),
            kind: AnimationKind(-3),
        };
        assert_eq!(event.to_cells(), [4, 12, 99, -3]);
    }
}
