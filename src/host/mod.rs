//! Capabilities the menu core consumes from the GUI it runs in.

pub mod egui_host;
pub mod headless;
pub mod window_stack;

use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, TextureId, Vec2};

use crate::menu::popup::PopupId;

/// Sound cues played by the menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A root popup appeared. Nested sub-menus open silently.
    MenuOpened,
    /// A popup was removed with its close sound requested.
    MenuClosed,
    /// An option was picked or toggled.
    OptionSelected,
}

/// Input state sampled once at the start of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    /// Pointer position in UI space, if the pointer is over the window.
    pub pointer: Option<Pos2>,
    /// Whether the primary button was clicked this frame.
    pub primary_clicked: bool,
    /// The area popups are clamped to.
    pub screen_rect: Rect,
    /// Text typed this frame.
    pub typed_text: String,
    /// Whether backspace was pressed this frame.
    pub backspace: bool,
    /// Whether escape was pressed this frame.
    pub escape: bool,
}

impl FrameInput {
    /// Input with no pointer and no keys for the given screen area.
    pub fn idle(screen_rect: Rect) -> Self {
        Self {
            pointer: None,
            primary_clicked: false,
            screen_rect,
            typed_text: String::new(),
            backspace: false,
            escape: false,
        }
    }
}

/// Input, drawing and sound capabilities of the GUI the menus live in.
///
/// Drawing calls after [`MenuHost::begin_window`] go to that popup's layer.
pub trait MenuHost {
    /// Input for the current frame.
    fn input(&self) -> FrameInput;

    /// Start drawing the contents of a popup window.
    fn begin_window(&mut self, id: PopupId, rect: Rect, opacity: f32);

    /// Size of `text` laid out on a single line.
    fn text_size(&self, text: &str, font: &FontId) -> Vec2;

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, corner_radius: u8, color: Color32);

    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect, corner_radius: u8, stroke: Stroke);

    /// Draw a single line of text anchored at `pos`.
    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, font: FontId, color: Color32);

    /// Draw a line segment.
    fn line(&mut self, points: [Pos2; 2], stroke: Stroke);

    /// Draw a texture stretched over `rect`.
    fn image(&mut self, texture: TextureId, rect: Rect, tint: Color32);

    /// Play a sound cue.
    fn play_sound(&mut self, cue: SoundCue);
}
