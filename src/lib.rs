//! Cascading float menus for egui.
//!
//! A [`PopupMenu`] is a floating window holding an ordered list of
//! [`MenuOption`]s. A [`SubMenuOption`] row opens a child popup when hovered,
//! and child popups can hold sub-menus of their own, to any depth. All popups
//! of one open chain form a linked group: moving the pointer between a parent
//! row and its child popup keeps the whole chain alive, while leaving all of
//! them (or choosing an option anywhere in the tree) collapses it.
//!
//! The menu core only talks to a [`MenuHost`] (input, draw primitives, sound)
//! and a [`WindowStack`]. [`EguiHost`] drives it from an [`egui::Context`];
//! [`RecordingHost`] runs it headless.
//!
//! # Examples
//!
//! ```rust,no_run
//! use egui_float_menus::{FloatMenuLayer, FloatMenuOption, MenuOption, SubMenuOption};
//!
//! let mut layer = FloatMenuLayer::new();
//! let colors: Vec<Box<dyn MenuOption>> = vec![
//!     Box::new(FloatMenuOption::new("Red", || println!("red"))) as Box<dyn MenuOption>,
//!     Box::new(FloatMenuOption::new("Green", || println!("green"))),
//! ];
//! layer.open_options(vec![
//!     Box::new(FloatMenuOption::new("Rename", || println!("rename"))) as Box<dyn MenuOption>,
//!     Box::new(SubMenuOption::new("Color", colors)),
//! ]);
//!
//! // once per frame:
//! // layer.show(ctx);
//! ```

pub mod error;
pub mod host;
pub mod menu;

pub use error::MenuError;
pub use host::egui_host::EguiHost;
pub use host::headless::RecordingHost;
pub use host::window_stack::WindowStack;
pub use host::{FrameInput, MenuHost, SoundCue};
pub use menu::divider::DividerOption;
pub use menu::filter::{FilterRequest, OptionListFilter, OptionPredicate};
pub use menu::layer::FloatMenuLayer;
pub use menu::linked_group::{self as linked_group, GroupRegistry, LinkedMenuGroup};
pub use menu::option::{
    ExtraPart, FloatMenuOption, HostMenu, MenuIcon, MenuOption, MenuOptionPriority, OptionAction,
    OptionRow, SizeMode, priority_order,
};
pub use menu::popup::{Placement, PopupId, PopupMenu, PopupOutcome};
pub use menu::search::SearchOption;
pub use menu::style::MenuStyle;
pub use menu::sub_menu::{ExtensionProbe, SubMenuCompat, SubMenuOption};
pub use menu::toggle::ToggleOption;
pub use menu::MenuCx;
