//! Main application loop - eframe::App implementation.

use eframe::egui;
use log::info;

use crate::app::SeqlineApp;
use crate::core::view_events::SnapToggledEvent;
use crate::core::viewport::Axis;
use crate::widgets::editor::{timeline_editor, EditorAction};

impl eframe::App for SeqlineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.status_bar(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                match timeline_editor(ui, &mut self.editor, &self.theme) {
                    EditorAction::Seek(time) => {
                        if let Some(playhead) = self.editor.markers.markers.get_mut("playhead") {
                            playhead.set_position(time);
                            info!("Playhead moved to {:.2}", time);
                        }
                    }
                    EditorAction::None => {}
                }
            });

        // Deferred event processing after all widgets ran
        self.handle_events();
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}

impl SeqlineApp {
    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let vp = &self.editor.viewport;
                ui.label(format!(
                    "zoom {:.1}x{:.1} px/unit | offset {:.2},{:.2}",
                    vp.zoom(Axis::Time),
                    vp.zoom(Axis::Track),
                    vp.offset(Axis::Time),
                    vp.offset(Axis::Track),
                ));
                ui.separator();
                match self.cursor {
                    Some((time, track)) => ui.label(format!("cursor {time:.2} / {track:.0}")),
                    None => ui.label("cursor -"),
                };
                ui.separator();
                if ui.checkbox(&mut self.snap_enabled, "Snap").changed() {
                    self.editor.grid.config.snap = [self.snap_enabled; 2];
                    self.event_bus.emit(SnapToggledEvent { enabled: self.snap_enabled });
                }
            });
        });
    }
}
