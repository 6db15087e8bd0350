//! Fixed-capacity animation storage.
//!
//! Slots are preallocated once. Allocation pops an index free list and
//! release pushes it back, so neither touches the heap. The active set is a
//! dense `Vec` of handles with a per-slot back-index, which makes removal an
//! O(1) swap-remove. Its order is NOT creation order: every removal moves the
//! last handle into the hole.

use crate::api::types::AnimHandle;
use crate::components::animation::AnimationSlot;

pub(crate) struct AnimationPool {
    slots: Vec<AnimationSlot>,
    /// Free slot indices. Popped from the back.
    free: Vec<u32>,
    /// Handles of active slots, unordered.
    active: Vec<AnimHandle>,
    /// For each slot, its position in `active` (meaningless when inactive).
    positions: Vec<u32>,
}

impl AnimationPool {
    /// `capacity` must fit the `u32` handle space.
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(u32::try_from(capacity).is_ok(), "pool capacity {} overflows handles", capacity);
        Self {
            slots: vec![AnimationSlot::default(); capacity],
            // Reversed so a fresh pool hands out 0, 1, 2, ...
            free: (0..capacity as u32).rev().collect(),
            active: Vec::with_capacity(capacity),
            positions: vec![0; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Store a populated slot. `None` when every slot is taken.
    pub fn insert(&mut self, slot: AnimationSlot) -> Option<AnimHandle> {
        let index = self.free.pop()?;
        let handle = AnimHandle(index);
        self.slots[handle.index()] = slot;
        self.positions[handle.index()] = self.active.len() as u32;
        self.active.push(handle);
        Some(handle)
    }

    pub fn is_active(&self, handle: AnimHandle) -> bool {
        self.slots.get(handle.index()).is_some_and(|s| s.active)
    }

    /// The slot behind an active handle.
    pub fn get(&self, handle: AnimHandle) -> Option<&AnimationSlot> {
        self.slots.get(handle.index()).filter(|s| s.active)
    }

    /// Handle at position `i` of the active set.
    pub fn active_handle(&self, i: usize) -> Option<AnimHandle> {
        self.active.get(i).copied()
    }

    /// Slot storage regardless of activity. Only valid for handles taken
    /// from the active set.
    pub fn slot(&self, handle: AnimHandle) -> &AnimationSlot {
        &self.slots[handle.index()]
    }

    /// Deactivate an active handle. Returns false for out-of-range or
    /// already inactive handles.
    pub fn release(&mut self, handle: AnimHandle) -> bool {
        if !self.is_active(handle) {
            return false;
        }
        let position = self.positions[handle.index()] as usize;
        self.release_at(position);
        true
    }

    /// Drop the handle at position `i` of the active set and deactivate its
    /// slot. The last handle moves to `i`, so iteration must not advance.
    pub fn release_at(&mut self, i: usize) -> AnimHandle {
        let handle = self.active.swap_remove(i);
        if let Some(&moved) = self.active.get(i) {
            self.positions[moved.index()] = i as u32;
        }
        let slot = &mut self.slots[handle.index()];
        if slot.active {
            slot.active = false;
            self.free.push(handle.0);
        }
        handle
    }

    /// Release every active slot matching `pred`. Visits each active handle
    /// exactly once and returns how many were released.
    pub fn release_where(&mut self, mut pred: impl FnMut(AnimHandle, &AnimationSlot) -> bool) -> usize {
        let mut released = 0;
        let mut i = 0;
        while let Some(handle) = self.active_handle(i) {
            if pred(handle, &self.slots[handle.index()]) {
                self.release_at(i);
                released += 1;
            } else {
                i += 1;
            }
        }
        released
    }

    /// Deactivate every slot and rebuild the free list.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
        self.active.clear();
        self.free.clear();
        self.free.extend((0..self.slots.len() as u32).rev());
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        let mut seen = vec![false; self.capacity()];
        for (i, h) in self.active.iter().enumerate() {
            assert!(self.slots[h.index()].active, "{:?} in active set but inactive", h);
            assert_eq!(self.positions[h.index()] as usize, i);
            assert!(!seen[h.index()], "{:?} listed twice", h);
            seen[h.index()] = true;
        }
        let active_slots = self.slots.iter().filter(|s| s.active).count();
        assert_eq!(active_slots, self.active.len());
        assert_eq!(self.free.len() + self.active.len(), self.capacity());
    }
}
