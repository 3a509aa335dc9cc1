mod common;

use common::*;
use egui::pos2;
use egui_float_menus::{
    FilterRequest, FloatMenuLayer, GroupRegistry, MenuOption, PopupId, PopupMenu, RecordingHost,
    SearchOption, linked_group,
};

fn contains(needle: &'static str) -> FilterRequest {
    FilterRequest::new(move |o| o.label().contains(needle), false, true)
}

fn visible(layer: &FloatMenuLayer, popup: PopupId) -> Vec<String> {
    layer.popup(popup).map(|p| p.visible_labels()).unwrap_or_default()
}

#[test]
fn test_recursive_filter_reaches_sub_menus() {
    init_logger();
    let mut layer = FloatMenuLayer::new();
    let mut host = RecordingHost::default();
    let mut popup = PopupMenu::new(vec![plain("A"), sub("B", vec![plain("C"), plain("D")])])
        .at(pos2(100.0, 100.0))
        .vanish_if_mouse_distant(false);
    popup.filter(contains("C"));
    let root = layer.open(popup);
    hover(&mut layer, &mut host, None);
    assert_eq!(visible(&layer, root), ["B"]);

    // The sub-menu was closed while filtered; opening it applies the filter.
    let point = row_center(&layer, root, 0);
    hover(&mut layer, &mut host, Some(point));
    let child = child_of(&layer, root, "B");
    assert_eq!(visible(&layer, child), ["C"]);
}

#[test]
fn test_reset_restores_every_level() {
    init_logger();
    let mut host = RecordingHost::default();
    let mut windows = egui_float_menus::WindowStack::new();
    let style = egui_float_menus::MenuStyle::default();
    let mut root = PopupMenu::new(vec![plain("A"), sub("B", vec![plain("C"), plain("D")])])
        .at(pos2(100.0, 100.0))
        .vanish_if_mouse_distant(false);

    let mut show = |root: &mut PopupMenu, host: &mut RecordingHost| {
        let mut cx = egui_float_menus::MenuCx::new(host, &mut windows, &style);
        root.show(&mut cx);
    };

    show(&mut root, &mut host);
    root.filter(contains("C"));
    show(&mut root, &mut host);
    host.set_pointer(root.row_rect(0).map(|r| r.center()));
    show(&mut root, &mut host);

    let child_labels = |root: &PopupMenu| {
        root.option_by_label("B")
            .and_then(|o| o.child_popup())
            .map(|c| c.visible_labels())
            .unwrap_or_default()
    };
    assert_eq!(root.visible_labels(), ["B"]);
    assert_eq!(child_labels(&root), ["C"]);

    root.filter(FilterRequest::reset(true));
    assert_eq!(root.visible_labels(), ["A", "B"]);
    assert_eq!(child_labels(&root), ["C", "D"]);
}

#[test]
fn test_last_deferred_request_wins() {
    init_logger();
    let mut layer = FloatMenuLayer::new();
    let mut host = RecordingHost::default();
    let mut popup = PopupMenu::new(vec![plain("apple"), plain("banana"), plain("cherry")])
        .at(pos2(100.0, 100.0))
        .vanish_if_mouse_distant(false);
    popup.filter(contains("apple"));
    popup.filter(contains("an"));
    let root = layer.open(popup);

    hover(&mut layer, &mut host, None);
    assert_eq!(visible(&layer, root), ["banana"]);
}

#[test]
fn test_search_filters_as_you_type() {
    init_logger();
    let mut layer = FloatMenuLayer::new();
    let mut host = RecordingHost::default();
    let root = layer.open(
        PopupMenu::new(vec![
            Box::new(SearchOption::new(true)) as Box<dyn MenuOption>,
            plain("Apple"),
            plain("Banana"),
            sub("Fruit basket", vec![plain("Cherry"), plain("Plum")]),
        ])
        .at(pos2(100.0, 100.0))
        .vanish_if_mouse_distant(false),
    );
    hover(&mut layer, &mut host, None);
    assert_eq!(visible(&layer, root).len(), 4);

    host.type_text("AN");
    layer.run_frame(&mut host);
    assert_eq!(visible(&layer, root), ["Search", "Banana"]);

    host.press_backspace();
    layer.run_frame(&mut host);
    host.press_backspace();
    layer.run_frame(&mut host);
    assert_eq!(visible(&layer, root).len(), 4);

    host.type_text("ch");
    layer.run_frame(&mut host);
    assert_eq!(visible(&layer, root), ["Search", "Fruit basket"]);

    // Lay the filtered rows out, then open the basket.
    hover(&mut layer, &mut host, None);
    let point = row_center(&layer, root, 1);
    hover(&mut layer, &mut host, Some(point));
    let basket = child_of(&layer, root, "Fruit basket");
    assert_eq!(visible(&layer, basket), ["Cherry"]);
}

#[test]
fn test_search_only_listens_on_top_popup() {
    init_logger();
    let mut layer = FloatMenuLayer::new();
    let mut host = RecordingHost::default();
    let first = layer.open(
        PopupMenu::new(vec![Box::new(SearchOption::new(false)) as Box<dyn MenuOption>, plain("one")])
            .at(pos2(100.0, 100.0))
            .vanish_if_mouse_distant(false),
    );
    let second = layer.open(
        PopupMenu::new(vec![Box::new(SearchOption::new(false)) as Box<dyn MenuOption>, plain("two")])
            .at(pos2(600.0, 100.0))
            .vanish_if_mouse_distant(false),
    );
    hover(&mut layer, &mut host, None);

    host.type_text("zz");
    layer.run_frame(&mut host);
    assert_eq!(visible(&layer, first), ["Search", "one"]);
    assert_eq!(visible(&layer, second), ["Search"]);
}

#[test]
fn test_group_dissolves_when_root_leaves() {
    let mut registry = GroupRegistry::new();
    let (root, a, b) = (PopupId::next(), PopupId::next(), PopupId::next());
    registry.join(root, a);
    registry.join(root, b);

    registry.leave(a);
    assert_eq!(registry.members(root), vec![root, b]);

    registry.leave(root);
    assert!(registry.members(b).is_empty());
    assert!(!registry.is_grouped(b));
}

#[test]
fn test_ungrouped_distance_is_none() {
    assert_eq!(linked_group::min_distance(PopupId::next(), pos2(10.0, 10.0)), None);
}
