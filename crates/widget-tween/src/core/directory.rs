use crate::api::traits::{Directory, Owner};
use crate::api::types::{OwnerId, TargetId};
use crate::components::widget::Widget;

/// An owner entity (player session) and the widgets it currently shows.
#[derive(Debug, Clone)]
pub struct MemoryOwner {
    pub id: OwnerId,
    widgets: Vec<Widget>,
}

impl MemoryOwner {
    pub fn new(id: OwnerId) -> Self {
        Self { id, widgets: Vec::new() }
    }

    pub fn with_widget(mut self, widget: Widget) -> Self {
        self.widgets.push(widget);
        self
    }

    /// Add a widget. Replaces any widget with the same id.
    pub fn add_widget(&mut self, widget: Widget) {
        self.remove_widget(widget.id);
        self.widgets.push(widget);
    }

    /// Remove a widget by ID. Returns the removed widget if found.
    pub fn remove_widget(&mut self, id: TargetId) -> Option<Widget> {
        let idx = self.widgets.iter().position(|w| w.id == id)?;
        Some(self.widgets.swap_remove(idx))
    }

    pub fn widget(&self, id: TargetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }
}

impl Owner for MemoryOwner {
    type Target = Widget;

    fn resolve_target(&mut self, id: TargetId) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }
}

/// Simple owner storage using a flat Vec.
/// Designed for server-sized populations (hundreds of owners, not millions).
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    owners: Vec<MemoryOwner>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory with a specific owner capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { owners: Vec::with_capacity(capacity) }
    }

    /// Add an owner. Replaces any owner with the same id.
    pub fn connect(&mut self, owner: MemoryOwner) {
        self.disconnect(owner.id);
        self.owners.push(owner);
    }

    /// Remove an owner by ID. Returns the removed owner if found.
    pub fn disconnect(&mut self, id: OwnerId) -> Option<MemoryOwner> {
        let idx = self.owners.iter().position(|o| o.id == id)?;
        Some(self.owners.swap_remove(idx))
    }

    pub fn owner(&self, id: OwnerId) -> Option<&MemoryOwner> {
        self.owners.iter().find(|o| o.id == id)
    }

    pub fn owner_mut(&mut self, id: OwnerId) -> Option<&mut MemoryOwner> {
        self.owners.iter_mut().find(|o| o.id == id)
    }

    /// Shortcut for `owner(owner).widget(target)`.
    pub fn widget(&self, owner: OwnerId, target: TargetId) -> Option<&Widget> {
        self.owner(owner)?.widget(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemoryOwner> {
        self.owners.iter()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl Directory for MemoryDirectory {
    type Owner = MemoryOwner;

    fn resolve_owner(&mut self, id: OwnerId) -> Option<&mut MemoryOwner> {
        self.owner_mut(id)
    }
}
