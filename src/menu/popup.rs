use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use egui::{Align2, Pos2, Rect, Stroke, Vec2, pos2, vec2};
use log::debug;

use super::MenuCx;
use super::filter::{FilterRequest, OptionListFilter};
use super::linked_group::{self, RECT_MARGIN};
use super::option::{HostMenu, MenuOption, SizeMode};
use super::style::MenuStyle;
use crate::host::{MenuHost, SoundCue};

/// Pointer distance beyond which a popup vanishes.
pub const VANISH_DISTANCE: f32 = 95.0;

const CORNER_RADIUS: u8 = 4;

static NEXT_POPUP_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PopupId(u64);

impl PopupId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_POPUP_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PopupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a popup appears when first shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// At the pointer.
    AtPointer,
    /// With its top-left corner at a fixed position.
    Fixed(Pos2),
    /// Next to a sub-menu row: the pointer plus an offset taken when the row
    /// opened it, or `anchor` when there is no pointer.
    Child { mouse_offset: Vec2, anchor: Pos2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopupState {
    Pending,
    Open,
    Closed,
}

/// Result of showing a popup for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupOutcome {
    /// Still open.
    Open,
    /// An option was chosen; the owner should close the popup.
    Chosen,
    /// The pointer moved too far away; the owner should close the popup.
    Vanished,
    /// Already closed, nothing was drawn.
    Closed,
}

/// A floating window listing options top to bottom.
pub struct PopupMenu {
    id: PopupId,
    title: Option<String>,
    options: OptionListFilter,
    placement: Placement,
    rect: Rect,
    state: PopupState,
    vanish_if_mouse_distant: bool,
    open_sound: Option<SoundCue>,
    opacity: f32,
    row_rects: Vec<Rect>,
    on_close: Option<Box<dyn Fn() + Send + Sync>>,
    on_option_chosen: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

impl PopupMenu {
    /// A top-level popup opening at the pointer.
    pub fn new(options: Vec<Box<dyn MenuOption>>) -> Self {
        Self::with_list(
            OptionListFilter::new(options),
            Placement::AtPointer,
            Some(SoundCue::MenuOpened),
            true,
        )
    }

    /// The popup a sub-menu row opens. It plays no sound when opening.
    pub(crate) fn child(
        options: OptionListFilter,
        mouse_offset: Vec2,
        anchor: Pos2,
        vanish_if_mouse_distant: bool,
    ) -> Self {
        Self::with_list(
            options,
            Placement::Child {
                mouse_offset,
                anchor,
            },
            None,
            vanish_if_mouse_distant,
        )
    }

    fn with_list(
        options: OptionListFilter,
        placement: Placement,
        open_sound: Option<SoundCue>,
        vanish_if_mouse_distant: bool,
    ) -> Self {
        Self {
            id: PopupId::next(),
            title: None,
            options,
            placement,
            rect: Rect::NOTHING,
            state: PopupState::Pending,
            vanish_if_mouse_distant,
            open_sound,
            opacity: 1.0,
            row_rects: Vec::new(),
            on_close: None,
            on_option_chosen: None,
        }
    }

    /// Show a title header above the options
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Open with the top-left corner at `pos` instead of at the pointer
    pub fn at(mut self, pos: Pos2) -> Self {
        self.placement = Placement::Fixed(pos);
        self
    }

    /// Set whether the popup vanishes when the pointer moves away
    pub fn vanish_if_mouse_distant(mut self, vanish: bool) -> Self {
        self.vanish_if_mouse_distant = vanish;
        self
    }

    /// Run `callback` once when the popup closes
    pub fn on_close(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    /// Run `callback` with the label of every option chosen in this popup
    pub fn on_option_chosen(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_option_chosen = Some(Box::new(callback));
        self
    }

    /// Identity in the window stack and in linked groups.
    pub fn id(&self) -> PopupId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn is_child(&self) -> bool {
        matches!(self.placement, Placement::Child { .. })
    }

    pub fn is_open(&self) -> bool {
        self.state == PopupState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == PopupState::Closed
    }

    /// Screen rect, once the popup has been shown.
    pub fn rect(&self) -> Option<Rect> {
        (self.state == PopupState::Open).then_some(self.rect)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn options(&self) -> &OptionListFilter {
        &self.options
    }

    pub(crate) fn options_mut(&mut self) -> &mut OptionListFilter {
        &mut self.options
    }

    /// The option at `index` of the full list, filtered or not.
    pub fn option(&self, index: usize) -> Option<&dyn MenuOption> {
        self.options.options().get(index).map(|o| o.as_ref())
    }

    pub fn option_by_label(&self, label: &str) -> Option<&dyn MenuOption> {
        self.options
            .options()
            .iter()
            .find(|o| o.label() == label)
            .map(|o| o.as_ref())
    }

    pub fn visible_labels(&self) -> Vec<String> {
        self.options.visible_labels()
    }

    /// Rect of the `position`th visible row as of the last frame.
    pub fn row_rect(&self, position: usize) -> Option<Rect> {
        self.row_rects.get(position).copied()
    }

    /// Filter the options. Applied when the popup opens if it is not open yet.
    pub fn filter(&mut self, request: FilterRequest) {
        self.options.filter(request);
    }

    /// This popup or an open descendant with the given id.
    pub fn find(&self, id: PopupId) -> Option<&PopupMenu> {
        if self.id == id {
            return Some(self);
        }
        self.options
            .options()
            .iter()
            .filter_map(|o| o.child_popup())
            .find_map(|child| child.find(id))
    }

    /// Ids of this popup and every open descendant, parents first.
    pub fn open_chain(&self) -> Vec<PopupId> {
        let mut ids = vec![self.id];
        for child in self.options.options().iter().filter_map(|o| o.child_popup()) {
            ids.extend(child.open_chain());
        }
        ids
    }

    pub(crate) fn into_option_list(self) -> OptionListFilter {
        self.options
    }

    fn layout_size(&self, host: &dyn MenuHost, style: &MenuStyle) -> Vec2 {
        let mut width: f32 = 0.0;
        let mut height = 0.0;
        for option in self.options.visible() {
            let size = option.required_size(host, style);
            width = width.max(size.x);
            height += size.y;
        }
        if let Some(title) = &self.title {
            let title_width = host.text_size(title, &style.font(SizeMode::Normal)).x;
            width = width.max(title_width + style.padding * 2.0);
            height += style.row_height(SizeMode::Normal);
        }
        vec2(width.clamp(style.min_width, style.max_width), height)
    }

    fn clamp_to_screen(pos: Pos2, size: Vec2, screen: Rect) -> Pos2 {
        pos2(
            pos.x.min(screen.max.x - size.x).max(screen.min.x),
            pos.y.min(screen.max.y - size.y).max(screen.min.y),
        )
    }

    fn open(&mut self, cx: &mut MenuCx<'_>) {
        self.options.attach(self.id);
        let mode = SizeMode::for_count(self.options.len());
        for option in self.options.options_mut() {
            option.set_size_mode(mode);
        }

        let size = self.layout_size(&*cx.host, cx.style);
        let screen = cx.input.screen_rect;
        let origin = match self.placement {
            Placement::AtPointer => cx.input.pointer.unwrap_or(screen.min),
            Placement::Fixed(pos) => pos,
            Placement::Child {
                mouse_offset,
                anchor,
            } => cx
                .input
                .pointer
                .map(|pointer| pointer + mouse_offset)
                .unwrap_or(anchor),
        };
        self.rect = Rect::from_min_size(Self::clamp_to_screen(origin, size, screen), size);
        self.options.take_resize();
        self.state = PopupState::Open;

        cx.windows.push(self.id);
        cx.windows.set_rect(self.id, self.rect);
        debug!("opened popup {} at {:?}", self.id, self.rect);
        if let Some(cue) = self.open_sound {
            cx.play_sound(cue);
        }
    }

    fn resize(&mut self, cx: &mut MenuCx<'_>) {
        let size = self.layout_size(&*cx.host, cx.style);
        let min = Self::clamp_to_screen(self.rect.min, size, cx.input.screen_rect);
        self.rect = Rect::from_min_size(min, size);
    }

    /// Distance used for vanishing: the linked group's when grouped.
    fn pointer_distance(&self, pointer: Pos2) -> f32 {
        linked_group::min_distance(self.id, pointer)
            .unwrap_or_else(|| self.rect.expand(RECT_MARGIN).distance_to_pos(pointer))
    }

    /// Draw the popup and its open descendants for one frame.
    ///
    /// Rows ignore the click of the frame the popup opens in.
    pub fn show(&mut self, cx: &mut MenuCx<'_>) -> PopupOutcome {
        let opened_now = self.state == PopupState::Pending;
        match self.state {
            PopupState::Closed => return PopupOutcome::Closed,
            PopupState::Pending => self.open(cx),
            PopupState::Open => {
                if self.options.take_resize() {
                    self.resize(cx);
                }
            }
        }

        cx.windows.set_rect(self.id, self.rect);
        linked_group::set_rect(self.id, self.rect);

        self.opacity = 1.0;
        if self.vanish_if_mouse_distant
            && let Some(pointer) = cx.input.pointer
        {
            let distance = self.pointer_distance(pointer);
            if distance > VANISH_DISTANCE {
                debug!("popup {} vanished, pointer {distance:.0} px away", self.id);
                return PopupOutcome::Vanished;
            }
            self.opacity = 1.0 - distance / VANISH_DISTANCE;
        }

        let style = cx.style;
        let rect = self.rect;
        cx.host.begin_window(self.id, rect, self.opacity);
        cx.host.fill_rect(rect, CORNER_RADIUS, style.background_color);
        cx.host
            .stroke_rect(rect, CORNER_RADIUS, Stroke::new(1.0, style.border_color));

        let mut y = rect.min.y;
        if let Some(title) = &self.title {
            let height = style.row_height(SizeMode::Normal);
            cx.host.text(
                pos2(rect.min.x + style.padding, y + height / 2.0),
                Align2::LEFT_CENTER,
                title,
                style.font(SizeMode::Normal),
                style.title_color,
            );
            y += height;
        }

        let menu = HostMenu {
            id: self.id,
            rect,
            vanish_if_mouse_distant: self.vanish_if_mouse_distant,
            visible_count: self.options.visible_count(),
        };
        let visible = self.options.visible_indices().to_vec();
        self.row_rects.clear();
        let clicked = cx.input.primary_clicked;
        if opened_now {
            cx.input.primary_clicked = false;
        }
        let mut chosen = None;
        for index in visible {
            let Some(option) = self.options.options_mut().get_mut(index) else {
                continue;
            };
            let height = option.required_size(&*cx.host, style).y;
            let row = Rect::from_min_size(pos2(rect.min.x, y), vec2(rect.width(), height));
            y += height;
            self.row_rects.push(row);
            if option.render(row, &menu, cx) && chosen.is_none() {
                chosen = Some(index);
            }
        }
        cx.input.primary_clicked = clicked;

        if let Some(request) = cx.take_filter_request() {
            self.options.filter(request);
        }

        if let Some(index) = chosen {
            return self.choose(index, cx);
        }

        // A choice inside an open child counts as choosing its row here.
        let bubbled = self
            .options
            .options_mut()
            .iter_mut()
            .position(|option| option.show_child(cx));
        match bubbled {
            Some(index) => self.choose(index, cx),
            None => PopupOutcome::Open,
        }
    }

    fn choose(&mut self, index: usize, cx: &mut MenuCx<'_>) -> PopupOutcome {
        if let Some(option) = self.options.options_mut().get_mut(index) {
            debug!("popup {} chose {:?}", self.id, option.label());
            if let Some(callback) = &self.on_option_chosen {
                callback(option.label());
            }
            if option.plays_selection_sound() {
                cx.play_sound(SoundCue::OptionSelected);
            }
            option.chosen(cx);
        }
        PopupOutcome::Chosen
    }

    /// Close the popup and every open descendant. Closing twice does nothing.
    pub fn close(&mut self, cx: &mut MenuCx<'_>) {
        if self.state == PopupState::Closed {
            return;
        }
        let was_open = self.state == PopupState::Open;
        self.state = PopupState::Closed;

        for option in self.options.options_mut() {
            option.on_host_close(cx);
        }
        cx.remove_window(self.id, was_open && self.open_sound.is_some());
        self.options.detach();
        self.row_rects.clear();
        debug!("closed popup {}", self.id);

        if let Some(callback) = &self.on_close {
            callback();
        }
    }
}

impl fmt::Debug for PopupMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupMenu")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("placement", &self.placement)
            .field("rect", &self.rect)
            .field("state", &self.state)
            .field("options", &self.options.len())
            .finish_non_exhaustive()
    }
}
