use egui::{
    Align2, Area, Color32, Context, CornerRadius, FontId, Id, Key, Order, Painter, Pos2, Rect,
    Sense, Stroke, StrokeKind, TextureId, Vec2, pos2,
};
use log::trace;

use super::{FrameInput, MenuHost, SoundCue};
use crate::menu::popup::PopupId;

/// Sound callback type shared by [`EguiHost`] and the menu layer.
pub type SoundCallback = dyn Fn(SoundCue) + Send + Sync;

/// A [`MenuHost`] drawing into an [`egui::Context`].
///
/// Every popup gets its own foreground [`Area`] at the popup's position; the
/// area allocates the popup's full size so clicks on a popup never reach the
/// widgets underneath it. Popups are moved to the top in drawing order, so a
/// child popup always covers its parent.
pub struct EguiHost<'a> {
    ctx: &'a Context,
    input: FrameInput,
    painter: Option<Painter>,
    sound: Option<&'a SoundCallback>,
}

impl<'a> EguiHost<'a> {
    /// Sample this frame's input from `ctx`.
    ///
    /// # Arguments
    /// * `ctx` - The egui context
    /// * `sound` - Optional callback receiving the menu sound cues
    pub fn new(ctx: &'a Context, sound: Option<&'a SoundCallback>) -> Self {
        Self {
            ctx,
            input: sample_input(ctx),
            painter: None,
            sound,
        }
    }
}

/// Read pointer, click, screen and key state from the context.
pub fn sample_input(ctx: &Context) -> FrameInput {
    let screen_rect = ctx.content_rect();
    ctx.input(|i| {
        let mut typed_text = String::new();
        for event in &i.events {
            if let egui::Event::Text(text) = event {
                typed_text.push_str(text);
            }
        }
        FrameInput {
            pointer: i.pointer.hover_pos(),
            primary_clicked: i.pointer.primary_clicked(),
            screen_rect,
            typed_text,
            backspace: i.key_pressed(Key::Backspace),
            escape: i.key_pressed(Key::Escape),
        }
    })
}

impl MenuHost for EguiHost<'_> {
    fn input(&self) -> FrameInput {
        self.input.clone()
    }

    fn begin_window(&mut self, id: PopupId, rect: Rect, opacity: f32) {
        let size = rect.size();
        let response = Area::new(Id::new(("float_menu", id)))
            .fixed_pos(rect.min)
            .order(Order::Foreground)
            .show(self.ctx, |ui| {
                ui.set_min_size(size);
                ui.allocate_exact_size(size, Sense::click());
                ui.painter().clone()
            });

        self.ctx.move_to_top(response.response.layer_id);

        let mut painter = response.inner;
        painter.set_opacity(opacity);
        self.painter = Some(painter);
        trace!("drawing popup {id} at {rect:?}");
    }

    fn text_size(&self, text: &str, font: &FontId) -> Vec2 {
        self.ctx.fonts_mut(|f| {
            f.layout_no_wrap(text.to_owned(), font.clone(), Color32::WHITE)
                .size()
        })
    }

    fn fill_rect(&mut self, rect: Rect, corner_radius: u8, color: Color32) {
        if let Some(painter) = &self.painter {
            painter.rect_filled(rect, CornerRadius::same(corner_radius), color);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, corner_radius: u8, stroke: Stroke) {
        if let Some(painter) = &self.painter {
            painter.rect_stroke(
                rect,
                CornerRadius::same(corner_radius),
                stroke,
                StrokeKind::Outside,
            );
        }
    }

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, font: FontId, color: Color32) {
        if let Some(painter) = &self.painter {
            painter.text(pos, anchor, text, font, color);
        }
    }

    fn line(&mut self, points: [Pos2; 2], stroke: Stroke) {
        if let Some(painter) = &self.painter {
            painter.line_segment(points, stroke);
        }
    }

    fn image(&mut self, texture: TextureId, rect: Rect, tint: Color32) {
        if let Some(painter) = &self.painter {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture, rect, uv, tint);
        }
    }

    fn play_sound(&mut self, cue: SoundCue) {
        if let Some(sound) = self.sound {
            sound(cue);
        }
    }
}
