//! Popup menus, their options and the per-frame context they render with.

pub mod divider;
pub mod filter;
pub mod layer;
pub mod linked_group;
pub mod option;
pub mod popup;
pub mod search;
pub mod style;
pub mod sub_menu;
pub mod toggle;

use egui::Rect;
use log::debug;

use crate::host::window_stack::WindowStack;
use crate::host::{FrameInput, MenuHost, SoundCue};
use filter::FilterRequest;
use popup::{PopupId, PopupMenu};
use style::MenuStyle;

/// Everything a popup and its rows need while rendering one frame.
///
/// Input is sampled once when the context is created, so every popup of a
/// frame sees the same pointer.
pub struct MenuCx<'a> {
    pub(crate) host: &'a mut dyn MenuHost,
    pub(crate) windows: &'a mut WindowStack,
    pub(crate) style: &'a MenuStyle,
    pub(crate) input: FrameInput,
    filter_request: Option<FilterRequest>,
    spawned: Vec<PopupMenu>,
}

impl<'a> MenuCx<'a> {
    /// Start a frame.
    pub fn new(
        host: &'a mut dyn MenuHost,
        windows: &'a mut WindowStack,
        style: &'a MenuStyle,
    ) -> Self {
        let input = host.input();
        Self {
            host,
            windows,
            style,
            input,
            filter_request: None,
            spawned: Vec::new(),
        }
    }

    /// This frame's input.
    pub fn input(&self) -> &FrameInput {
        &self.input
    }

    /// The style popups are drawn with.
    pub fn style(&self) -> &MenuStyle {
        self.style
    }

    /// The host, for drawing.
    pub fn host(&mut self) -> &mut dyn MenuHost {
        &mut *self.host
    }

    /// The window stack.
    pub fn windows(&self) -> &WindowStack {
        self.windows
    }

    /// Whether the pointer is inside `rect` and `window` is the topmost
    /// window under the pointer.
    pub fn pointer_over(&self, window: PopupId, rect: Rect) -> bool {
        match self.input.pointer {
            Some(pointer) => {
                rect.contains(pointer) && self.windows.topmost_at(pointer) == Some(window)
            }
            None => false,
        }
    }

    /// Whether `rect` was clicked this frame, see [`MenuCx::pointer_over`].
    pub fn clicked(&self, window: PopupId, rect: Rect) -> bool {
        self.input.primary_clicked && self.pointer_over(window, rect)
    }

    /// Play a sound through the host.
    pub fn play_sound(&mut self, cue: SoundCue) {
        self.host.play_sound(cue);
    }

    /// Ask the popup currently rendering to filter its options once its rows
    /// are done. A later request in the same frame replaces an earlier one.
    pub fn request_filter(&mut self, request: FilterRequest) {
        self.filter_request = Some(request);
    }

    pub(crate) fn take_filter_request(&mut self) -> Option<FilterRequest> {
        self.filter_request.take()
    }

    /// Queue a new top-level popup, opened by the layer at the end of the frame.
    pub fn open_root(&mut self, popup: PopupMenu) {
        self.spawned.push(popup);
    }

    /// Take the popups queued with [`MenuCx::open_root`].
    pub fn take_spawned(&mut self) -> Vec<PopupMenu> {
        std::mem::take(&mut self.spawned)
    }

    /// Remove a popup from the window stack and from its linked group in one
    /// step.
    pub(crate) fn remove_window(&mut self, id: PopupId, play_close_sound: bool) {
        let removed = self.windows.remove(id);
        linked_group::leave(id);
        if removed {
            debug!("removed popup {id} from the window stack");
            if play_close_sound {
                self.host.play_sound(SoundCue::MenuClosed);
            }
        }
    }
}
