use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, TextureId, Vec2, pos2, vec2};

use super::{FrameInput, MenuHost, SoundCue};
use crate::menu::popup::PopupId;

/// A [`MenuHost`] without a GUI behind it.
///
/// Input is set by the caller between frames; sounds, windows and text drawn
/// are recorded so the menus can be driven and inspected headless. Text is
/// measured with a fixed advance of half the font size per character.
#[derive(Debug)]
pub struct RecordingHost {
    /// Input returned for the next frame.
    pub input: FrameInput,
    /// Every sound cue played, in order.
    pub sounds: Vec<SoundCue>,
    /// Windows begun, in drawing order, with their opacity.
    pub windows: Vec<(PopupId, Rect, f32)>,
    /// Every text drawn, in order.
    pub texts: Vec<String>,
}

impl RecordingHost {
    /// A host with the given screen size and no pointer.
    pub fn new(screen_size: Vec2) -> Self {
        Self {
            input: FrameInput::idle(Rect::from_min_size(pos2(0.0, 0.0), screen_size)),
            sounds: Vec::new(),
            windows: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Move the pointer (or remove it) and clear this frame's keys and clicks.
    pub fn set_pointer(&mut self, pointer: Option<Pos2>) {
        let screen_rect = self.input.screen_rect;
        self.input = FrameInput::idle(screen_rect);
        self.input.pointer = pointer;
    }

    /// Move the pointer to `pos` and click there.
    pub fn click_at(&mut self, pos: Pos2) {
        self.set_pointer(Some(pos));
        self.input.primary_clicked = true;
    }

    /// Type text this frame, keeping the pointer where it is.
    pub fn type_text(&mut self, text: &str) {
        self.set_pointer(self.input.pointer);
        self.input.typed_text = text.to_owned();
    }

    /// Press backspace this frame, keeping the pointer where it is.
    pub fn press_backspace(&mut self) {
        self.set_pointer(self.input.pointer);
        self.input.backspace = true;
    }

    /// Forget what was drawn so far.
    pub fn clear_drawing(&mut self) {
        self.windows.clear();
        self.texts.clear();
    }

    /// How often a sound cue was played.
    pub fn count_sound(&self, cue: SoundCue) -> usize {
        self.sounds.iter().filter(|played| **played == cue).count()
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new(vec2(1920.0, 1080.0))
    }
}

impl MenuHost for RecordingHost {
    fn input(&self) -> FrameInput {
        self.input.clone()
    }

    fn begin_window(&mut self, id: PopupId, rect: Rect, opacity: f32) {
        self.windows.push((id, rect, opacity));
    }

    fn text_size(&self, text: &str, font: &FontId) -> Vec2 {
        vec2(text.chars().count() as f32 * font.size * 0.5, font.size)
    }

    fn fill_rect(&mut self, _rect: Rect, _corner_radius: u8, _color: Color32) {}

    fn stroke_rect(&mut self, _rect: Rect, _corner_radius: u8, _stroke: Stroke) {}

    fn text(&mut self, _pos: Pos2, _anchor: Align2, text: &str, _font: FontId, _color: Color32) {
        self.texts.push(text.to_owned());
    }

    fn line(&mut self, _points: [Pos2; 2], _stroke: Stroke) {}

    fn image(&mut self, _texture: TextureId, _rect: Rect, _tint: Color32) {}

    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }
}
