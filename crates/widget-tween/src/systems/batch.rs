//! Per-tick dirty batch: which widgets of which owner were written.

use std::collections::HashMap;
use crate::api::types::{OwnerId, TargetId};

/// Widgets touched this tick, grouped per owner in first-touch order.
///
/// Group vectors are recycled across ticks, so a warmed-up batch does not
/// allocate.
pub(crate) struct DirtyBatch {
    groups: Vec<(OwnerId, Vec<TargetId>)>,
    /// Number of groups in use this tick.
    len: usize,
    index: HashMap<OwnerId, usize>,
}

impl DirtyBatch {
    pub fn with_capacity(owners: usize) -> Self {
        Self {
            groups: Vec::with_capacity(owners),
            len: 0,
            index: HashMap::with_capacity(owners),
        }
    }

    pub fn clear(&mut self) {
        for (_, targets) in &mut self.groups[..self.len] {
            targets.clear();
        }
        self.len = 0;
        self.index.clear();
    }

    /// Record a write to `target`. Returns false if it was already recorded.
    pub fn mark(&mut self, owner: OwnerId, target: TargetId) -> bool {
        if let Some(&i) = self.index.get(&owner) {
            let targets = &mut self.groups[i].1;
            if targets.contains(&target) {
                return false;
            }
            targets.push(target);
            return true;
        }

        if self.len == self.groups.len() {
            self.groups.push((owner, Vec::new()));
        } else {
            self.groups[self.len].0 = owner;
        }
        self.groups[self.len].1.push(target);
        self.index.insert(owner, self.len);
        self.len += 1;
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (OwnerId, &[TargetId])> {
        self.groups[..self.len].iter().map(|(owner, targets)| (*owner, targets.as_slice()))
    }

    #[cfg(test)]
    pub fn target_count(&self) -> usize {
        self.iter().map(|(_, t)| t.len()).sum()
    }
}
