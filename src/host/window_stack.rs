use egui::{Pos2, Rect};

use crate::menu::popup::PopupId;

/// Z-ordered set of open popup windows, bottom first.
///
/// Besides the open/closed query, the stack remembers the last rect each
/// window was drawn at so the pointer can be attributed to the topmost window
/// under it.
#[derive(Debug, Default)]
pub struct WindowStack {
    windows: Vec<(PopupId, Option<Rect>)>,
}

impl WindowStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a window on top of the stack. Returns `false` if it was already open.
    pub fn push(&mut self, id: PopupId) -> bool {
        if self.is_open(id) {
            return false;
        }
        self.windows.push((id, None));
        true
    }

    /// Remove a window. Returns `false` if it was not open.
    pub fn remove(&mut self, id: PopupId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|(window, _)| *window != id);
        self.windows.len() != before
    }

    /// Whether the window is currently open.
    pub fn is_open(&self, id: PopupId) -> bool {
        self.windows.iter().any(|(window, _)| *window == id)
    }

    /// Record where a window was drawn this frame.
    pub fn set_rect(&mut self, id: PopupId, rect: Rect) {
        if let Some((_, slot)) = self.windows.iter_mut().find(|(window, _)| *window == id) {
            *slot = Some(rect);
        }
    }

    /// The last recorded rect of a window.
    pub fn rect(&self, id: PopupId) -> Option<Rect> {
        self.windows
            .iter()
            .find(|(window, _)| *window == id)
            .and_then(|(_, rect)| *rect)
    }

    /// The topmost window whose rect contains `pos`.
    pub fn topmost_at(&self, pos: Pos2) -> Option<PopupId> {
        self.windows
            .iter()
            .rev()
            .find(|(_, rect)| rect.is_some_and(|r| r.contains(pos)))
            .map(|(id, _)| *id)
    }

    /// Number of open windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window is open.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Ids of the open windows, bottom first.
    pub fn ids(&self) -> impl Iterator<Item = PopupId> + '_ {
        self.windows.iter().map(|(id, _)| *id)
    }
}
