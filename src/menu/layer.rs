use egui::{Align2, Color32, Context, FontId, Pos2, Rect, Stroke, TextureId, Vec2};
use log::debug;

use super::MenuCx;
use super::option::MenuOption;
use super::popup::{PopupId, PopupMenu, PopupOutcome};
use super::style::MenuStyle;
use crate::error::MenuError;
use crate::host::egui_host::{EguiHost, SoundCallback};
use crate::host::window_stack::WindowStack;
use crate::host::{FrameInput, MenuHost, SoundCue};

/// Owns the open top-level popups and drives them once per frame.
///
/// # Examples
///
/// ```rust,no_run
/// use egui_float_menus::{FloatMenuLayer, FloatMenuOption, MenuOption};
///
/// fn ui(ctx: &egui::Context, layer: &mut FloatMenuLayer) {
///     if ctx.input(|i| i.pointer.secondary_clicked()) {
///         layer.open_options(vec![
///             Box::new(FloatMenuOption::new("Copy", || println!("copy"))) as Box<dyn MenuOption>,
///         ]);
///     }
///     layer.show(ctx);
/// }
/// ```
pub struct FloatMenuLayer {
    roots: Vec<PopupMenu>,
    windows: WindowStack,
    style: MenuStyle,
    sound_callback: Option<Box<SoundCallback>>,
}

impl Default for FloatMenuLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl FloatMenuLayer {
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            windows: WindowStack::new(),
            style: MenuStyle::default(),
            sound_callback: None,
        }
    }

    /// Set the style popups are drawn with
    pub fn with_style(mut self, style: MenuStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the callback receiving sound cues
    ///
    /// # Arguments
    /// * `callback` - Called with every cue the menus play
    pub fn with_sound_callback(mut self, callback: impl Fn(SoundCue) + Send + Sync + 'static) -> Self {
        self.sound_callback = Some(Box::new(callback));
        self
    }

    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    /// Open a top-level popup. It is positioned when first shown.
    pub fn open(&mut self, popup: PopupMenu) -> PopupId {
        let id = popup.id();
        self.windows.push(id);
        self.roots.push(popup);
        debug!("queued popup {id}");
        id
    }

    /// Open `options` as a popup at the pointer.
    pub fn open_options(&mut self, options: Vec<Box<dyn MenuOption>>) -> PopupId {
        self.open(PopupMenu::new(options))
    }

    /// Close a top-level popup and everything opened from it.
    pub fn close(&mut self, id: PopupId) -> Result<(), MenuError> {
        let index = self
            .roots
            .iter()
            .position(|root| root.id() == id && !root.is_closed())
            .ok_or(MenuError::NotOpen(id))?;

        let mut popup = self.roots.remove(index);
        let mut host = DetachedHost {
            sound: self.sound_callback.as_deref(),
        };
        let mut cx = MenuCx::new(&mut host, &mut self.windows, &self.style);
        popup.close(&mut cx);
        Ok(())
    }

    /// Close every open popup.
    pub fn close_all(&mut self) {
        let mut host = DetachedHost {
            sound: self.sound_callback.as_deref(),
        };
        let mut cx = MenuCx::new(&mut host, &mut self.windows, &self.style);
        for mut popup in self.roots.drain(..) {
            popup.close(&mut cx);
        }
    }

    /// Whether a popup, top-level or nested, is open.
    pub fn is_open(&self, id: PopupId) -> bool {
        self.windows.is_open(id)
    }

    /// A top-level popup or an open descendant.
    pub fn popup(&self, id: PopupId) -> Option<&PopupMenu> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    pub fn root_ids(&self) -> Vec<PopupId> {
        self.roots.iter().map(|root| root.id()).collect()
    }

    /// Number of open popup windows, nested ones included.
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn windows(&self) -> &WindowStack {
        &self.windows
    }

    /// Draw every open popup into `ctx` for this frame.
    pub fn show(&mut self, ctx: &Context) {
        let Self {
            roots,
            windows,
            style,
            sound_callback,
        } = self;
        let mut host = EguiHost::new(ctx, sound_callback.as_deref());
        Self::drive(roots, windows, style, &mut host);
    }

    /// Run one frame against any host.
    pub fn run_frame(&mut self, host: &mut dyn MenuHost) {
        Self::drive(&mut self.roots, &mut self.windows, &self.style, host);
    }

    fn drive(
        roots: &mut Vec<PopupMenu>,
        windows: &mut WindowStack,
        style: &MenuStyle,
        host: &mut dyn MenuHost,
    ) {
        let mut cx = MenuCx::new(host, windows, style);

        let clicked_outside = cx.input.primary_clicked
            && cx
                .input
                .pointer
                .is_some_and(|pointer| cx.windows.topmost_at(pointer).is_none());
        if clicked_outside {
            for root in roots.iter_mut().filter(|root| root.is_open()) {
                debug!("click outside closes popup {}", root.id());
                root.close(&mut cx);
            }
        }

        for root in roots.iter_mut() {
            match root.show(&mut cx) {
                PopupOutcome::Chosen | PopupOutcome::Vanished => root.close(&mut cx),
                PopupOutcome::Open | PopupOutcome::Closed => {}
            }
        }

        let spawned = cx.take_spawned();
        drop(cx);

        roots.retain(|root| !root.is_closed());
        for popup in spawned {
            windows.push(popup.id());
            debug!("opened popup {} from a chosen option", popup.id());
            roots.push(popup);
        }
    }
}

/// Host for closing popups outside a frame. Only sounds reach anywhere.
struct DetachedHost<'a> {
    sound: Option<&'a SoundCallback>,
}

impl MenuHost for DetachedHost<'_> {
    fn input(&self) -> FrameInput {
        FrameInput::idle(Rect::NOTHING)
    }

    fn begin_window(&mut self, _id: PopupId, _rect: Rect, _opacity: f32) {}

    fn text_size(&self, _text: &str, _font: &FontId) -> Vec2 {
        Vec2::ZERO
    }

    fn fill_rect(&mut self, _rect: Rect, _corner_radius: u8, _color: Color32) {}

    fn stroke_rect(&mut self, _rect: Rect, _corner_radius: u8, _stroke: Stroke) {}

    fn text(&mut self, _pos: Pos2, _anchor: Align2, _text: &str, _font: FontId, _color: Color32) {}

    fn line(&mut self, _points: [Pos2; 2], _stroke: Stroke) {}

    fn image(&mut self, _texture: TextureId, _rect: Rect, _tint: Color32) {}

    fn play_sound(&mut self, cue: SoundCue) {
        if let Some(sound) = self.sound {
            sound(cue);
        }
    }
}
