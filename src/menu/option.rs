use std::cmp::Ordering;

use egui::{Align2, Color32, Rect, TextureId, Vec2, pos2, vec2};

use super::MenuCx;
use super::filter::FilterRequest;
use super::popup::{PopupId, PopupMenu};
use super::style::MenuStyle;
use crate::host::MenuHost;

/// Coarse ordering group of an option. Higher tiers sort first in sub-menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum MenuOptionPriority {
    DisabledOption,
    Low,
    #[default]
    Default,
    High,
    Critical,
}

/// Visual density of a row. Menus with many options use [`SizeMode::Tiny`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeMode {
    #[default]
    Normal,
    Tiny,
}

impl SizeMode {
    /// Option lists longer than this render tiny.
    pub const TINY_THRESHOLD: usize = 60;

    /// The size mode for a list of `count` options.
    pub fn for_count(count: usize) -> Self {
        if count > Self::TINY_THRESHOLD {
            SizeMode::Tiny
        } else {
            SizeMode::Normal
        }
    }
}

/// Texture drawn at the left of a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuIcon {
    pub texture: TextureId,
    pub tint: Color32,
}

/// Inline extra content drawn at the right of a row. Returning `true`
/// activates the row.
pub type ExtraPart = Box<dyn Fn(&mut dyn MenuHost, Rect) -> bool + Send + Sync>;

/// The popup a row is being rendered in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostMenu {
    pub id: PopupId,
    /// The popup's whole body.
    pub rect: Rect,
    pub vanish_if_mouse_distant: bool,
    /// Number of options currently shown by the popup.
    pub visible_count: usize,
}

/// Fields shared by every kind of row.
pub struct OptionRow {
    pub label: String,
    /// Tier the row is sorted into.
    pub priority: MenuOptionPriority,
    /// Position inside the tier, higher first.
    pub order_in_priority: i32,
    pub icon: Option<MenuIcon>,
    /// Width handed to [`OptionRow::extra_part`].
    pub extra_part_width: f32,
    pub extra_part: Option<ExtraPart>,
    /// Width kept free after the extra part, e.g. for a sub-menu arrow.
    pub reserved_width: f32,
    /// Play [`crate::host::SoundCue::OptionSelected`] when the row is chosen.
    pub play_selection_sound: bool,
    pub size_mode: SizeMode,
    pub disabled: bool,
}

impl OptionRow {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            priority: MenuOptionPriority::Default,
            order_in_priority: 0,
            icon: None,
            extra_part_width: 0.0,
            extra_part: None,
            reserved_width: 0.0,
            play_selection_sound: true,
            size_mode: SizeMode::Normal,
            disabled: false,
        }
    }

    /// Size the row needs to show its label, icon and extra region.
    pub fn required_size(&self, host: &dyn MenuHost, style: &MenuStyle) -> Vec2 {
        let height = style.row_height(self.size_mode);
        let label = host.text_size(&self.label, &style.font(self.size_mode)).x;
        let icon = if self.icon.is_some() { height } else { 0.0 };
        vec2(
            label + icon + style.padding * 2.0 + self.extra_part_width + self.reserved_width,
            height,
        )
    }

    /// The extra part plus the reserved width, at the right end of `rect`.
    pub fn extra_region(&self, rect: Rect) -> Rect {
        let width = self.extra_part_width + self.reserved_width;
        if width <= 0.0 {
            return Rect::NOTHING;
        }
        Rect::from_min_max(pos2(rect.max.x - width, rect.min.y), rect.max)
    }

    /// Draw background, icon, label and extra part. Returns whether the extra
    /// part asked to activate the row.
    pub fn draw(&self, rect: Rect, highlighted: bool, cx: &mut MenuCx<'_>) -> bool {
        let style = cx.style;
        let host = &mut *cx.host;

        if highlighted && !self.disabled {
            host.fill_rect(rect, 2, style.hover_color);
        }

        let mut x = rect.min.x + style.padding;
        if let Some(icon) = &self.icon {
            let side = (rect.height() - 4.0).max(0.0);
            let icon_rect = Rect::from_min_size(pos2(x, rect.center().y - side / 2.0), vec2(side, side));
            host.image(icon.texture, icon_rect, icon.tint);
            x += side + 4.0;
        }

        let color = if self.disabled {
            style.disabled_text_color
        } else {
            style.text_color
        };
        host.text(
            pos2(x, rect.center().y),
            Align2::LEFT_CENTER,
            &self.label,
            style.font(self.size_mode),
            color,
        );

        match &self.extra_part {
            Some(extra) if self.extra_part_width > 0.0 => {
                let region = self.extra_region(rect);
                let part = Rect::from_min_size(region.min, vec2(self.extra_part_width, region.height()));
                extra(host, part)
            }
            _ => false,
        }
    }
}

/// A row in a popup menu.
///
/// Sub-menu capabilities have neutral defaults, so plain rows only implement
/// [`MenuOption::row`], [`MenuOption::row_mut`] and [`MenuOption::render`].
pub trait MenuOption {
    /// The shared row fields.
    fn row(&self) -> &OptionRow;

    fn row_mut(&mut self) -> &mut OptionRow;

    fn label(&self) -> &str {
        &self.row().label
    }

    fn priority(&self) -> MenuOptionPriority {
        self.row().priority
    }

    fn order_in_priority(&self) -> i32 {
        self.row().order_in_priority
    }

    fn set_order_in_priority(&mut self, order: i32) {
        self.row_mut().order_in_priority = order;
    }

    fn size_mode(&self) -> SizeMode {
        self.row().size_mode
    }

    fn set_size_mode(&mut self, mode: SizeMode) {
        self.row_mut().size_mode = mode;
    }

    fn required_size(&self, host: &dyn MenuHost, style: &MenuStyle) -> Vec2 {
        self.row().required_size(host, style)
    }

    /// Draw the row into `rect` and report whether it was activated this frame.
    fn render(&mut self, rect: Rect, menu: &HostMenu, cx: &mut MenuCx<'_>) -> bool;

    /// Run the option's action after its popup picked it.
    fn chosen(&mut self, _cx: &mut MenuCx<'_>) {}

    fn plays_selection_sound(&self) -> bool {
        self.row().play_selection_sound
    }

    fn is_search_field(&self) -> bool {
        false
    }

    fn is_sub_menu_open(&self) -> bool {
        false
    }

    fn child_popup(&self) -> Option<&PopupMenu> {
        None
    }

    /// Whether any option below this one matches `predicate`.
    fn any_matches(&self, _predicate: &dyn Fn(&dyn MenuOption) -> bool, _recursive: bool) -> bool {
        false
    }

    fn filter_sub_menu(&mut self, _request: FilterRequest) {}

    /// Draw any popup this option keeps open. Called after the host popup's
    /// rows. Returns `true` when an option was chosen inside that popup, which
    /// makes this option the host popup's choice in the same frame.
    fn show_child(&mut self, _cx: &mut MenuCx<'_>) -> bool {
        false
    }

    /// The popup hosting this option is closing.
    fn on_host_close(&mut self, _cx: &mut MenuCx<'_>) {}

    fn with_priority(mut self, priority: MenuOptionPriority) -> Self
    where
        Self: Sized,
    {
        self.row_mut().priority = priority;
        self
    }

    fn with_order_in_priority(mut self, order: i32) -> Self
    where
        Self: Sized,
    {
        self.row_mut().order_in_priority = order;
        self
    }

    fn with_icon(mut self, texture: TextureId, tint: Color32) -> Self
    where
        Self: Sized,
    {
        self.row_mut().icon = Some(MenuIcon { texture, tint });
        self
    }

    /// Draw extra content in a region of `width` at the right of the row.
    fn with_extra_part(
        mut self,
        width: f32,
        extra: impl Fn(&mut dyn MenuHost, Rect) -> bool + Send + Sync + 'static,
    ) -> Self
    where
        Self: Sized,
    {
        let row = self.row_mut();
        row.extra_part_width = width;
        row.extra_part = Some(Box::new(extra));
        self
    }

    fn without_selection_sound(mut self) -> Self
    where
        Self: Sized,
    {
        self.row_mut().play_selection_sound = false;
        self
    }
}

/// Descending tier, then descending order within the tier.
pub fn priority_order(a: &dyn MenuOption, b: &dyn MenuOption) -> Ordering {
    b.priority()
        .cmp(&a.priority())
        .then_with(|| b.order_in_priority().cmp(&a.order_in_priority()))
}

/// What a [`FloatMenuOption`] does when chosen.
pub enum OptionAction {
    /// The row is shown greyed out and cannot be chosen.
    Disabled,
    Callback(Box<dyn Fn() + Send + Sync>),
    /// Open the options as a new top-level popup. Taken on first use.
    OpenMenu(Option<Vec<Box<dyn MenuOption>>>),
}

/// A plain clickable row.
pub struct FloatMenuOption {
    row: OptionRow,
    action: OptionAction,
}

impl FloatMenuOption {
    /// A row running `action` when chosen.
    pub fn new(label: impl Into<String>, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            row: OptionRow::new(label),
            action: OptionAction::Callback(Box::new(action)),
        }
    }

    /// A greyed out row that cannot be chosen.
    pub fn disabled(label: impl Into<String>) -> Self {
        let mut row = OptionRow::new(label);
        row.disabled = true;
        row.priority = MenuOptionPriority::DisabledOption;
        Self {
            row,
            action: OptionAction::Disabled,
        }
    }

    /// A row that opens `options` as a new top-level menu when chosen.
    pub fn opening_menu(label: impl Into<String>, options: Vec<Box<dyn MenuOption>>) -> Self {
        Self {
            row: OptionRow::new(label),
            action: OptionAction::OpenMenu(Some(options)),
        }
    }

    pub fn action(&self) -> &OptionAction {
        &self.action
    }
}

impl MenuOption for FloatMenuOption {
    fn row(&self) -> &OptionRow {
        &self.row
    }

    fn row_mut(&mut self) -> &mut OptionRow {
        &mut self.row
    }

    fn render(&mut self, rect: Rect, menu: &HostMenu, cx: &mut MenuCx<'_>) -> bool {
        let hovered = cx.pointer_over(menu.id, rect);
        let extra_activated = self.row.draw(rect, hovered, cx);
        if self.row.disabled {
            return false;
        }
        extra_activated || cx.clicked(menu.id, rect)
    }

    fn chosen(&mut self, cx: &mut MenuCx<'_>) {
        match &mut self.action {
            OptionAction::Disabled => {}
            OptionAction::Callback(action) => action(),
            OptionAction::OpenMenu(options) => {
                if let Some(options) = options.take() {
                    cx.open_root(PopupMenu::new(options));
                }
            }
        }
    }
}
