//! Measured toast heights reported by the renderer.

use crate::types::{HeightEntry, ToastId};

/// Heights of rendered toasts, ordered newest first like the toasts
/// themselves.
#[derive(Clone, Debug, Default)]
pub struct HeightRegistry {
    entries: Vec<HeightEntry>,
}

impl HeightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measured height. A new toast goes to the front; a known toast
    /// keeps its position and gets the new height.
    pub fn set(&mut self, entry: HeightEntry) {
        match self.position(&entry.toast_id) {
            Some(idx) => self.entries[idx] = entry,
            None => self.entries.insert(0, entry),
        }
    }

    /// Forget the height of a toast. Returns whether an entry was removed.
    pub fn remove(&mut self, id: &ToastId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.toast_id != id);
        self.entries.len() != before
    }

    pub fn get(&self, id: &ToastId) -> Option<f32> {
        self.entries
            .iter()
            .find(|e| &e.toast_id == id)
            .map(|e| e.height)
    }

    pub fn position(&self, id: &ToastId) -> Option<usize> {
        self.entries.iter().position(|e| &e.toast_id == id)
    }

    pub fn entries(&self) -> &[HeightEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
