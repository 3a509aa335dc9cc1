use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use eframe::egui;
use egui_float_menus::{
    DividerOption, FloatMenuLayer, FloatMenuOption, MenuOption, MenuOptionPriority, MenuStyle,
    PopupMenu, SearchOption, SubMenuCompat, ToggleOption,
};
use log::info;

fn main() -> eframe::Result<()> {
    env_logger::init();
    eframe::run_native(
        "Float menus",
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 640.0]),
            ..Default::default()
        },
        Box::new(|_cc| Ok(Box::new(CascadeDemo::new()))),
    )
}

struct CascadeDemo {
    layer: FloatMenuLayer,
    grid: Arc<AtomicBool>,
    compat: SubMenuCompat,
}

impl CascadeDemo {
    fn new() -> Self {
        let layer = FloatMenuLayer::new()
            .with_style(MenuStyle::default().with_text_size(14.0))
            .with_sound_callback(|cue| info!("sound {cue:?}"));
        // No extension replaces the menu window here.
        let compat = SubMenuCompat::detect(&|_: &str| false, &[]);
        Self {
            layer,
            grid: Arc::new(AtomicBool::new(true)),
            compat,
        }
    }

    fn leaf(label: &str) -> Box<dyn MenuOption> {
        let name = label.to_owned();
        Box::new(FloatMenuOption::new(label, move || info!("chose {name}")))
    }

    fn build_menu(&self) -> PopupMenu {
        let (reader, writer) = (self.grid.clone(), self.grid.clone());
        let shapes = (1..=80).map(|i| Self::leaf(&format!("Shape {i}"))).collect();

        PopupMenu::new(vec![
            Box::new(SearchOption::new(true)) as Box<dyn MenuOption>,
            Self::leaf("Rename"),
            Box::new(
                FloatMenuOption::new("Delete", || info!("chose Delete"))
                    .with_priority(MenuOptionPriority::Low),
            ),
            Box::new(DividerOption::with_label("Insert")),
            self.compat.create(
                "Colors",
                vec![
                    Self::leaf("Red"),
                    Self::leaf("Green"),
                    self.compat.create(
                        "Blues",
                        vec![Self::leaf("Navy"), Self::leaf("Sky"), Self::leaf("Teal")],
                    ),
                ],
            ),
            self.compat.create("Shapes", shapes),
            Box::new(DividerOption::new()),
            Box::new(ToggleOption::new(
                "Show grid",
                move || reader.load(Ordering::Relaxed),
                move || {
                    writer.fetch_xor(true, Ordering::Relaxed);
                },
            )),
            Box::new(FloatMenuOption::disabled("Export (no project)")),
        ])
        .with_title("Canvas")
        .on_option_chosen(|label| info!("root menu picked {label}"))
    }
}

impl eframe::App for CascadeDemo {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Right-click anywhere to open the menu");
            ui.label(format!(
                "Grid is {}",
                if self.grid.load(Ordering::Relaxed) { "on" } else { "off" }
            ));
        });

        if ctx.input(|i| i.pointer.secondary_clicked()) {
            self.layer.close_all();
            let menu = self.build_menu();
            self.layer.open(menu);
        }
        self.layer.show(ctx);
    }
}
