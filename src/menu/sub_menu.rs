use std::mem;

use egui::{Rect, Stroke, Vec2, pos2};
use log::{debug, info, trace};

use super::MenuCx;
use super::filter::{FilterRequest, OptionListFilter};
use super::linked_group;
use super::option::{FloatMenuOption, HostMenu, MenuOption, OptionRow, SizeMode, priority_order};
use super::popup::{PopupId, PopupMenu, PopupOutcome};

/// Width kept free at the right of a sub-menu row for the arrow.
pub const ARROW_WIDTH: f32 = 16.0;
const ARROW_INSET: f32 = 4.0;
const ARROW_ALPHA: f32 = 0.6;

/// Offset of a child popup from its row's top-right corner.
pub const MENU_OFFSET: Vec2 = Vec2::new(-1.0, 0.0);

enum SubMenuState {
    Closed(OptionListFilter),
    Open(Box<PopupMenu>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerZone {
    Row,
    Menu,
    Outside,
}

/// A row that opens a child popup with its own options while hovered.
///
/// The children are owned by the option while the child popup is closed and
/// move into the popup while it is open. Choosing an option anywhere below
/// closes the child and reports this row as chosen to its own popup in the
/// same frame, so a choice deep in the tree closes the whole chain at once.
pub struct SubMenuOption {
    row: OptionRow,
    state: SubMenuState,
    host_popup: Option<PopupId>,
    children_initialized: bool,
    extra_rect: Rect,
}

impl SubMenuOption {
    pub fn new(label: impl Into<String>, children: Vec<Box<dyn MenuOption>>) -> Self {
        let mut row = OptionRow::new(label);
        row.reserved_width = ARROW_WIDTH;
        row.play_selection_sound = false;
        Self {
            row,
            state: SubMenuState::Closed(OptionListFilter::new(children)),
            host_popup: None,
            children_initialized: false,
            extra_rect: Rect::NOTHING,
        }
    }

    /// The child options, sorted by priority on first access.
    pub fn children(&mut self) -> &mut [Box<dyn MenuOption>] {
        self.ensure_children_initialized();
        self.list_mut().options_mut()
    }

    /// The popup this row lives in, once rendered.
    pub fn host_popup(&self) -> Option<PopupId> {
        self.host_popup
    }

    fn list(&self) -> &OptionListFilter {
        match &self.state {
            SubMenuState::Closed(list) => list,
            SubMenuState::Open(popup) => popup.options(),
        }
    }

    fn list_mut(&mut self) -> &mut OptionListFilter {
        match &mut self.state {
            SubMenuState::Closed(list) => list,
            SubMenuState::Open(popup) => popup.options_mut(),
        }
    }

    fn ensure_children_initialized(&mut self) {
        if self.children_initialized {
            return;
        }
        self.children_initialized = true;
        let list = self.list_mut();
        list.sort_by(|a, b| priority_order(a.as_ref(), b.as_ref()));
        let mode = SizeMode::for_count(list.len());
        for child in list.options_mut() {
            child.set_size_mode(mode);
        }
    }

    /// Open the child popup next to `row`. Does nothing while open.
    fn open_sub_menu(&mut self, row: Rect, menu: &HostMenu, cx: &mut MenuCx<'_>) {
        if self.is_sub_menu_open() {
            return;
        }
        let Some(host) = self.host_popup else {
            return;
        };
        self.ensure_children_initialized();
        let SubMenuState::Closed(list) = &mut self.state else {
            return;
        };

        let anchor = row.right_top() + MENU_OFFSET;
        let mouse_offset = cx
            .input
            .pointer
            .map(|pointer| anchor - pointer)
            .unwrap_or(Vec2::ZERO);
        let popup = PopupMenu::child(
            mem::take(list),
            mouse_offset,
            anchor,
            menu.vanish_if_mouse_distant,
        );
        let child = popup.id();

        cx.windows.push(child);
        linked_group::join(host, child);
        linked_group::set_rect(host, menu.rect);
        debug!("{:?} opened sub-menu popup {child} from popup {host}", self.row.label);
        self.state = SubMenuState::Open(Box::new(popup));
    }

    /// Close the child popup and take the children back. Does nothing while closed.
    fn close_sub_menu(&mut self, cx: &mut MenuCx<'_>) {
        if !self.is_sub_menu_open() {
            return;
        }
        let state = mem::replace(&mut self.state, SubMenuState::Closed(OptionListFilter::default()));
        if let SubMenuState::Open(mut popup) = state {
            popup.close(cx);
            debug!("{:?} closed sub-menu popup {}", self.row.label, popup.id());
            self.state = SubMenuState::Closed(popup.into_option_list());
        }
    }

    fn classify_pointer(&self, row: Rect, menu: &HostMenu, cx: &MenuCx<'_>) -> PointerZone {
        let Some(pointer) = cx.input.pointer else {
            return PointerZone::Outside;
        };
        if cx.windows.topmost_at(pointer) != Some(menu.id) {
            return PointerZone::Outside;
        }
        let row_area = Rect::from_min_max(row.min, pos2(row.max.x, row.max.y - 1.0));
        if row_area.contains(pointer) {
            PointerZone::Row
        } else if menu.rect.contains(pointer) {
            PointerZone::Menu
        } else {
            PointerZone::Outside
        }
    }

    fn draw_arrow(&self, row: Rect, cx: &mut MenuCx<'_>) {
        let color = cx.style.text_color.gamma_multiply(ARROW_ALPHA);
        let left = row.max.x - ARROW_WIDTH + ARROW_INSET;
        let right = row.max.x - ARROW_INSET;
        let center_y = row.center().y;
        let half_height = (right - left) / 2.0;
        let stroke = Stroke::new(1.5, color);
        cx.host.line(
            [pos2(left, center_y - half_height), pos2(right, center_y)],
            stroke,
        );
        cx.host.line(
            [pos2(right, center_y), pos2(left, center_y + half_height)],
            stroke,
        );
    }
}

impl MenuOption for SubMenuOption {
    fn row(&self) -> &OptionRow {
        &self.row
    }

    fn row_mut(&mut self) -> &mut OptionRow {
        &mut self.row
    }

    fn render(&mut self, rect: Rect, menu: &HostMenu, cx: &mut MenuCx<'_>) -> bool {
        if self.host_popup.is_none() {
            self.host_popup = Some(menu.id);
        }

        self.extra_rect = if self.row.extra_part_width > 0.0 {
            let region = self.row.extra_region(rect);
            Rect::from_min_size(
                region.min,
                Vec2::new(self.row.extra_part_width, region.height()),
            )
        } else {
            Rect::NOTHING
        };

        let zone = self.classify_pointer(rect, menu, cx);
        let in_extra = cx.pointer_over(menu.id, self.extra_rect);
        trace!("{:?} pointer zone {zone:?}, in extra {in_extra}", self.row.label);

        if !in_extra {
            match zone {
                PointerZone::Row => self.open_sub_menu(rect, menu, cx),
                PointerZone::Menu => self.close_sub_menu(cx),
                PointerZone::Outside => {}
            }
        }

        let highlighted = zone == PointerZone::Row || in_extra || self.is_sub_menu_open();
        let extra_activated = self.row.draw(rect, highlighted, cx);
        self.draw_arrow(rect, cx);
        extra_activated && !self.row.disabled
    }

    fn is_sub_menu_open(&self) -> bool {
        matches!(self.state, SubMenuState::Open(_))
    }

    fn child_popup(&self) -> Option<&PopupMenu> {
        match &self.state {
            SubMenuState::Open(popup) => Some(popup),
            SubMenuState::Closed(_) => None,
        }
    }

    fn any_matches(&self, predicate: &dyn Fn(&dyn MenuOption) -> bool, recursive: bool) -> bool {
        self.list().options().iter().any(|child| {
            predicate(child.as_ref()) || (recursive && child.any_matches(predicate, true))
        })
    }

    fn filter_sub_menu(&mut self, request: FilterRequest) {
        self.list_mut().filter(request);
    }

    fn show_child(&mut self, cx: &mut MenuCx<'_>) -> bool {
        let SubMenuState::Open(popup) = &mut self.state else {
            return false;
        };
        match popup.show(cx) {
            PopupOutcome::Open => false,
            PopupOutcome::Chosen => {
                self.close_sub_menu(cx);
                true
            }
            PopupOutcome::Vanished | PopupOutcome::Closed => {
                self.close_sub_menu(cx);
                false
            }
        }
    }

    fn on_host_close(&mut self, cx: &mut MenuCx<'_>) {
        self.close_sub_menu(cx);
    }
}

/// Answers whether a named extension is active in the host application.
pub trait ExtensionProbe {
    /// # Arguments
    /// * `id` - The extension identifier to look up
    fn is_active(&self, id: &str) -> bool;
}

impl<F> ExtensionProbe for F
where
    F: Fn(&str) -> bool,
{
    fn is_active(&self, id: &str) -> bool {
        self(id)
    }
}

/// Chooses between nested sub-menus and opening children as separate menus.
///
/// Some host extensions replace the menu window and break nested popups. When
/// one of them is active, sub-menu rows are created as plain rows that open
/// their children as a new top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubMenuCompat {
    nested: bool,
}

impl Default for SubMenuCompat {
    fn default() -> Self {
        Self { nested: true }
    }
}

impl SubMenuCompat {
    /// Decide once from the extensions `probe` reports active.
    pub fn detect(probe: &dyn ExtensionProbe, conflicts: &[&str]) -> Self {
        match conflicts.iter().find(|id| probe.is_active(id)) {
            Some(id) => {
                info!("extension {id:?} is active, sub-menus open as separate menus");
                Self { nested: false }
            }
            None => Self::default(),
        }
    }

    pub fn uses_nested_menus(&self) -> bool {
        self.nested
    }

    /// A sub-menu row, or a plain row opening `children` as a new menu.
    pub fn create(
        &self,
        label: impl Into<String>,
        children: Vec<Box<dyn MenuOption>>,
    ) -> Box<dyn MenuOption> {
        if self.nested {
            Box::new(SubMenuOption::new(label, children))
        } else {
            Box::new(FloatMenuOption::opening_menu(label, children))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::option::MenuOptionPriority;

    fn leaf(label: &str, priority: MenuOptionPriority, order: i32) -> Box<dyn MenuOption> {
        Box::new(
            FloatMenuOption::new(label, || {})
                .with_priority(priority)
                .with_order_in_priority(order),
        )
    }

    fn labels(option: &mut SubMenuOption) -> Vec<String> {
        option.children().iter().map(|c| c.label().to_owned()).collect()
    }

    #[test]
    fn test_children_sorted_once() {
        let mut option = SubMenuOption::new(
            "parent",
            vec![
                leaf("low", MenuOptionPriority::Low, 0),
                leaf("first", MenuOptionPriority::Default, 5),
                leaf("second", MenuOptionPriority::Default, 1),
            ],
        );
        assert_eq!(labels(&mut option), ["first", "second", "low"]);

        option.children()[2].set_order_in_priority(100);
        assert_eq!(labels(&mut option), ["first", "second", "low"]);
    }

    #[test]
    fn test_many_children_use_tiny_rows() {
        let children = (0..61)
            .map(|i| leaf(&format!("item {i}"), MenuOptionPriority::Default, 0))
            .collect();
        let mut option = SubMenuOption::new("many", children);
        assert!(option.children().iter().all(|c| c.size_mode() == SizeMode::Tiny));
    }

    #[test]
    fn test_any_matches_descends_when_recursive() {
        let inner = SubMenuOption::new("inner", vec![leaf("needle", MenuOptionPriority::Default, 0)]);
        let outer = SubMenuOption::new("outer", vec![Box::new(inner) as Box<dyn MenuOption>]);
        let is_needle = |o: &dyn MenuOption| o.label() == "needle";
        assert!(outer.any_matches(&is_needle, true));
        assert!(!outer.any_matches(&is_needle, false));
    }

    #[test]
    fn test_compat_detects_conflicting_extension() {
        let active = |id: &str| id == "menu.replacer";
        let compat = SubMenuCompat::detect(&active, &["other", "menu.replacer"]);
        assert!(!compat.uses_nested_menus());
        assert!(!compat.create("x", Vec::new()).is_sub_menu_open());

        let nested = SubMenuCompat::detect(&active, &["other"]);
        assert!(nested.uses_nested_menus());
    }

    #[test]
    fn test_sub_menu_row_plays_no_selection_sound() {
        let option = SubMenuOption::new("parent", Vec::new());
        assert!(!option.plays_selection_sound());
        assert!(option.child_popup().is_none());
    }
}
