use egui::{Rect, Stroke, pos2, vec2};
use log::debug;

use super::MenuCx;
use super::option::{HostMenu, MenuOption, OptionRow};
use crate::host::SoundCue;

/// Width of the checkbox region.
pub const CHECKBOX_WIDTH: f32 = 20.0;
const CHECKBOX_SIZE: f32 = 12.0;

/// A row with a checkbox. Clicking it toggles and keeps the menu open.
pub struct ToggleOption {
    row: OptionRow,
    toggle: Box<dyn Fn() + Send + Sync>,
    check_on: Box<dyn Fn() -> bool + Send + Sync>,
    check_dimmed: Option<Box<dyn Fn() -> bool + Send + Sync>>,
}

impl ToggleOption {
    /// # Arguments
    /// * `label` - The row label
    /// * `check_on` - Whether the checkbox is currently ticked
    /// * `toggle` - Run on every click
    pub fn new(
        label: impl Into<String>,
        check_on: impl Fn() -> bool + Send + Sync + 'static,
        toggle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        let mut row = OptionRow::new(label);
        row.reserved_width = CHECKBOX_WIDTH;
        Self {
            row,
            toggle: Box::new(toggle),
            check_on: Box::new(check_on),
            check_dimmed: None,
        }
    }

    /// Draw the checkbox dimmed while `dimmed` returns true
    pub fn with_dimmed(mut self, dimmed: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.check_dimmed = Some(Box::new(dimmed));
        self
    }

    pub fn is_on(&self) -> bool {
        (self.check_on)()
    }

    fn draw_checkbox(&self, row: Rect, cx: &mut MenuCx<'_>) {
        let style = cx.style;
        let dimmed = self.check_dimmed.as_ref().is_some_and(|dimmed| dimmed());
        let color = if dimmed || self.row.disabled {
            style.disabled_text_color
        } else {
            style.text_color
        };

        let center = pos2(row.max.x - CHECKBOX_WIDTH / 2.0, row.center().y);
        let size = CHECKBOX_SIZE.min(row.height() - 4.0).max(0.0);
        let frame = Rect::from_center_size(center, vec2(size, size));
        cx.host.stroke_rect(frame, 2, Stroke::new(1.0, color));
        if self.is_on() {
            cx.host.fill_rect(frame.shrink(3.0), 1, color);
        }
    }
}

impl MenuOption for ToggleOption {
    fn row(&self) -> &OptionRow {
        &self.row
    }

    fn row_mut(&mut self) -> &mut OptionRow {
        &mut self.row
    }

    fn render(&mut self, rect: Rect, menu: &HostMenu, cx: &mut MenuCx<'_>) -> bool {
        let hovered = cx.pointer_over(menu.id, rect);
        self.row.draw(rect, hovered, cx);
        self.draw_checkbox(rect, cx);

        if !self.row.disabled && cx.clicked(menu.id, rect) {
            (self.toggle)();
            debug!("toggled {:?}, now {}", self.row.label, self.is_on());
            if self.row.play_selection_sound {
                cx.play_sound(SoundCue::OptionSelected);
            }
        }
        false
    }
}
