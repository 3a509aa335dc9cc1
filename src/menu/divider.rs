use egui::{Align2, Rect, Stroke, Vec2, pos2, vec2};

use super::MenuCx;
use super::option::{HostMenu, MenuOption, OptionRow, SizeMode};
use super::style::MenuStyle;
use crate::host::MenuHost;

/// Shortest line worth drawing.
pub const MIN_LINE_LENGTH: f32 = 10.0;
/// Narrowest width a divider asks for.
pub const MIN_WIDTH: f32 = 100.0;
const LABEL_GAP: f32 = 4.0;

/// A non-selectable separator row with an optional label.
pub struct DividerOption {
    row: OptionRow,
}

impl DividerOption {
    pub fn new() -> Self {
        Self::with_label("")
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        let mut row = OptionRow::new(label);
        row.play_selection_sound = false;
        row.size_mode = SizeMode::Tiny;
        Self { row }
    }
}

impl Default for DividerOption {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuOption for DividerOption {
    fn row(&self) -> &OptionRow {
        &self.row
    }

    fn row_mut(&mut self) -> &mut OptionRow {
        &mut self.row
    }

    // The label is always drawn small, whatever the popup's size mode.
    fn set_size_mode(&mut self, _mode: SizeMode) {}

    fn required_size(&self, host: &dyn MenuHost, style: &MenuStyle) -> Vec2 {
        let label = if self.row.label.is_empty() {
            0.0
        } else {
            host.text_size(&self.row.label, &style.font(SizeMode::Tiny)).x + LABEL_GAP
        };
        vec2(
            (label + style.padding * 2.0).max(MIN_WIDTH),
            style.row_height(SizeMode::Tiny),
        )
    }

    fn render(&mut self, rect: Rect, _menu: &HostMenu, cx: &mut MenuCx<'_>) -> bool {
        let style = cx.style;
        let mut line_start = rect.min.x + style.padding;
        if !self.row.label.is_empty() {
            let font = style.font(SizeMode::Tiny);
            let width = cx.host.text_size(&self.row.label, &font).x;
            cx.host.text(
                pos2(line_start, rect.center().y),
                Align2::LEFT_CENTER,
                &self.row.label,
                font,
                style.disabled_text_color,
            );
            line_start += width + LABEL_GAP;
        }

        let line_end = rect.max.x - style.padding;
        if line_end - line_start > MIN_LINE_LENGTH {
            let y = rect.center().y;
            cx.host.line(
                [pos2(line_start, y), pos2(line_end, y)],
                Stroke::new(1.0, style.border_color),
            );
        }
        false
    }
}
