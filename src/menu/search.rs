use egui::{Align2, Rect, Stroke, Vec2, pos2, vec2};
use log::debug;

use super::MenuCx;
use super::filter::FilterRequest;
use super::option::{HostMenu, MenuOption, OptionRow};
use super::style::MenuStyle;
use crate::host::MenuHost;

/// Width of the search field.
pub const SEARCH_WIDTH: f32 = 240.0;
const FIELD_MARGIN: f32 = 2.0;

/// A quick-search row filtering the popup it sits in.
///
/// Keyboard input only reaches the search row of the popup on top of the
/// window stack. Matching is a case-insensitive substring test on option
/// labels; with `sub_menus` set the search descends into sub-menus and keeps
/// a sub-menu row whenever one of its descendants matches.
pub struct SearchOption {
    row: OptionRow,
    query: String,
    sub_menus: bool,
    applied: Option<String>,
    no_results: bool,
}

impl SearchOption {
    pub fn new(sub_menus: bool) -> Self {
        let mut row = OptionRow::new("Search");
        row.play_selection_sound = false;
        Self {
            row,
            query: String::new(),
            sub_menus,
            applied: None,
            no_results: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the last frame found nothing besides the search row.
    pub fn has_no_results(&self) -> bool {
        self.no_results
    }

    fn read_keys(&mut self, cx: &MenuCx<'_>) {
        let input = &cx.input;
        self.query
            .extend(input.typed_text.chars().filter(|c| !c.is_control()));
        if input.backspace {
            self.query.pop();
        }
        if input.escape {
            self.query.clear();
        }
    }

    fn request(&self) -> FilterRequest {
        let needle = self.query.to_lowercase();
        FilterRequest::new(
            move |option| {
                option.is_search_field() || option.label().to_lowercase().contains(&needle)
            },
            self.query.is_empty(),
            self.sub_menus,
        )
    }
}

impl MenuOption for SearchOption {
    fn row(&self) -> &OptionRow {
        &self.row
    }

    fn row_mut(&mut self) -> &mut OptionRow {
        &mut self.row
    }

    fn required_size(&self, _host: &dyn MenuHost, style: &MenuStyle) -> Vec2 {
        vec2(
            SEARCH_WIDTH,
            style.row_height(self.row.size_mode) + FIELD_MARGIN * 2.0,
        )
    }

    fn render(&mut self, rect: Rect, menu: &HostMenu, cx: &mut MenuCx<'_>) -> bool {
        if cx.windows.ids().last() == Some(menu.id) {
            self.read_keys(cx);
        }
        if self.applied.as_deref() != Some(self.query.as_str()) {
            debug!("search in popup {} for {:?}", menu.id, self.query);
            cx.request_filter(self.request());
            self.applied = Some(self.query.clone());
        }
        self.no_results = menu.visible_count <= 1;

        let style = cx.style;
        let field = rect.shrink(FIELD_MARGIN);
        let border = if self.no_results {
            style.no_results_color
        } else {
            style.border_color
        };
        cx.host.fill_rect(field, 2, style.hover_color);
        cx.host.stroke_rect(field, 2, Stroke::new(1.0, border));

        let (text, color) = if self.query.is_empty() {
            (self.row.label.as_str(), style.disabled_text_color)
        } else {
            (self.query.as_str(), style.text_color)
        };
        cx.host.text(
            pos2(field.min.x + style.padding, field.center().y),
            Align2::LEFT_CENTER,
            text,
            style.font(self.row.size_mode),
            color,
        );
        false
    }

    fn is_search_field(&self) -> bool {
        true
    }
}
