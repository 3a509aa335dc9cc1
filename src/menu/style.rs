use egui::{Color32, FontId};

use super::option::SizeMode;

/// Colors and metrics the popups are drawn with.
///
/// Configured with the `with_*` builder methods:
///
/// ```rust
/// use egui::Color32;
/// use egui_float_menus::MenuStyle;
///
/// let style = MenuStyle::default()
///     .with_text_size(13.0)
///     .with_hover_color(Color32::from_rgb(70, 90, 120));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MenuStyle {
    /// Font size of option labels in normal size mode.
    pub text_size: f32,
    /// Popup background.
    pub background_color: Color32,
    /// Popup border.
    pub border_color: Color32,
    /// Option label color.
    pub text_color: Color32,
    /// Label color of disabled options and dividers.
    pub disabled_text_color: Color32,
    /// Row highlight under the pointer.
    pub hover_color: Color32,
    /// Title header text color.
    pub title_color: Color32,
    /// Search field tint when nothing matches.
    pub no_results_color: Color32,
    /// Height of a row in normal size mode.
    pub row_height: f32,
    /// Height of a row in tiny size mode.
    pub tiny_row_height: f32,
    /// Horizontal padding inside rows.
    pub padding: f32,
    /// Narrowest a popup gets.
    pub min_width: f32,
    /// Widest a popup gets.
    pub max_width: f32,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            text_size: 14.0,
            background_color: Color32::from_rgb(40, 40, 44),
            border_color: Color32::from_rgb(90, 90, 96),
            text_color: Color32::from_rgb(220, 220, 220),
            disabled_text_color: Color32::from_rgb(150, 150, 150),
            hover_color: Color32::from_rgb(62, 66, 78),
            title_color: Color32::from_rgb(200, 200, 160),
            no_results_color: Color32::from_rgb(220, 110, 110),
            row_height: 24.0,
            tiny_row_height: 18.0,
            padding: 8.0,
            min_width: 120.0,
            max_width: 300.0,
        }
    }
}

impl MenuStyle {
    /// Set the font size of option labels
    ///
    /// # Arguments
    /// * `size` - The font size in points
    pub fn with_text_size(mut self, size: f32) -> Self {
        self.text_size = size;
        self
    }

    /// Set the popup background color
    pub fn with_background_color(mut self, color: Color32) -> Self {
        self.background_color = color;
        self
    }

    /// Set the popup border color
    pub fn with_border_color(mut self, color: Color32) -> Self {
        self.border_color = color;
        self
    }

    /// Set the color of option labels
    pub fn with_text_color(mut self, color: Color32) -> Self {
        self.text_color = color;
        self
    }

    /// Set the color of disabled labels
    pub fn with_disabled_text_color(mut self, color: Color32) -> Self {
        self.disabled_text_color = color;
        self
    }

    /// Set the highlight color of the hovered row
    pub fn with_hover_color(mut self, color: Color32) -> Self {
        self.hover_color = color;
        self
    }

    /// Set the title header text color
    pub fn with_title_color(mut self, color: Color32) -> Self {
        self.title_color = color;
        self
    }

    /// Set the row heights for normal and tiny size mode
    pub fn with_row_heights(mut self, normal: f32, tiny: f32) -> Self {
        self.row_height = normal;
        self.tiny_row_height = tiny;
        self
    }

    /// Set the popup width bounds
    pub fn with_width_bounds(mut self, min: f32, max: f32) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    /// Label font for a size mode.
    pub fn font(&self, mode: SizeMode) -> FontId {
        match mode {
            SizeMode::Normal => FontId::proportional(self.text_size),
            SizeMode::Tiny => FontId::proportional(self.text_size * 0.8),
        }
    }

    /// Row height for a size mode.
    pub fn row_height(&self, mode: SizeMode) -> f32 {
        match mode {
            SizeMode::Normal => self.row_height,
            SizeMode::Tiny => self.tiny_row_height,
        }
    }
}
