mod common;

use common::*;
use egui::{Pos2, RawInput, Rect, pos2, vec2};
use egui_float_menus::{FloatMenuLayer, MenuStyle, PopupMenu};

fn raw_input(pointer: Option<Pos2>) -> RawInput {
    let mut input = RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
        ..Default::default()
    };
    if let Some(pos) = pointer {
        input.events.push(egui::Event::PointerMoved(pos));
    }
    input
}

#[test]
fn test_layer_draws_through_egui_context() {
    init_logger();
    let ctx = egui::Context::default();
    let mut layer = FloatMenuLayer::new().with_style(MenuStyle::default().with_text_size(13.0));
    let root = layer.open(
        PopupMenu::new(vec![plain("Copy"), sub("More", vec![plain("Paste")])])
            .with_title("Edit")
            .at(pos2(50.0, 50.0)),
    );

    let _ = ctx.run(raw_input(None), |ctx| layer.show(ctx));
    let rect = layer.popup(root).and_then(|p| p.rect()).unwrap();
    assert_eq!(rect.min, pos2(50.0, 50.0));
    assert!(rect.width() >= MenuStyle::default().min_width);

    let row = layer.popup(root).and_then(|p| p.row_rect(1)).unwrap();
    let _ = ctx.run(raw_input(Some(row.center())), |ctx| layer.show(ctx));
    let _ = ctx.run(raw_input(Some(row.center())), |ctx| layer.show(ctx));
    assert_eq!(layer.window_count(), 2);
    let child = child_of(&layer, root, "More");
    assert!(layer.popup(child).and_then(|p| p.rect()).is_some());
}
