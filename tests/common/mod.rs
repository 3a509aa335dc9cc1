#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use egui::Pos2;
use egui_float_menus::{
    FloatMenuLayer, FloatMenuOption, MenuOption, PopupId, RecordingHost, SubMenuOption,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A shared counter and a plain option bumping it when chosen.
pub fn counted(label: &str) -> (Arc<AtomicUsize>, Box<dyn MenuOption>) {
    let count = Arc::new(AtomicUsize::new(0));
    let hits = count.clone();
    let option = FloatMenuOption::new(label, move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    (count, Box::new(option))
}

pub fn plain(label: &str) -> Box<dyn MenuOption> {
    Box::new(FloatMenuOption::new(label, || {}))
}

pub fn sub(label: &str, children: Vec<Box<dyn MenuOption>>) -> Box<dyn MenuOption> {
    Box::new(SubMenuOption::new(label, children))
}

pub fn hits(count: &AtomicUsize) -> usize {
    count.load(Ordering::SeqCst)
}

/// Run a frame with the pointer at `pointer` and nothing pressed.
pub fn hover(layer: &mut FloatMenuLayer, host: &mut RecordingHost, pointer: Option<Pos2>) {
    host.set_pointer(pointer);
    layer.run_frame(host);
}

/// Run a frame clicking at `pos`.
pub fn click(layer: &mut FloatMenuLayer, host: &mut RecordingHost, pos: Pos2) {
    host.click_at(pos);
    layer.run_frame(host);
}

/// Center of the `position`th visible row of a popup, as of the last frame.
pub fn row_center(layer: &FloatMenuLayer, popup: PopupId, position: usize) -> Pos2 {
    layer
        .popup(popup)
        .and_then(|p| p.row_rect(position))
        .map(|r| r.center())
        .expect("row was laid out")
}

/// Id of the child popup open below the row labelled `label`.
pub fn child_of(layer: &FloatMenuLayer, popup: PopupId, label: &str) -> PopupId {
    layer
        .popup(popup)
        .and_then(|p| p.option_by_label(label))
        .and_then(|o| o.child_popup())
        .map(|child| child.id())
        .expect("sub-menu is open")
}
