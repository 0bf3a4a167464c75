//! Demo application hosting the timeline editor.

mod events;
mod run;

use eframe::egui;
use log::info;

use crate::core::event_bus::EventBus;
use crate::core::marker::Marker;
use crate::core::view_events::ViewEventEmitter;
use crate::core::viewport::Axis;
use crate::theme::Theme;
use crate::widgets::editor::TimelineEditor;

/// Main application state
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SeqlineApp {
    editor: TimelineEditor,
    snap_enabled: bool,
    #[serde(skip)]
    theme: Theme,
    #[serde(skip)]
    event_bus: EventBus,
    /// Latest pointer readout in content coordinates, for the status bar
    #[serde(skip)]
    cursor: Option<(f32, f32)>,
}

impl Default for SeqlineApp {
    fn default() -> Self {
        Self {
            editor: TimelineEditor::default(),
            snap_enabled: true,
            theme: Theme::default(),
            event_bus: EventBus::new(),
            cursor: None,
        }
    }
}

impl SeqlineApp {
    pub fn new(cc: &eframe::CreationContext<'_>, theme: Theme) -> Self {
        // Restore persisted editor state (zoom, pan, markers) if available
        let mut app: SeqlineApp = cc
            .storage
            .and_then(|s| eframe::get_value(s, eframe::APP_KEY))
            .unwrap_or_default();
        app.theme = theme;

        app.editor
            .set_emitter(ViewEventEmitter::from_emitter(app.event_bus.emitter()));
        app.editor.grid.config.snap = [app.snap_enabled; 2];
        app.seed_demo_markers();

        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        info!("Editor ready");
        app
    }

    /// Until a sequence backend exists, seed a playhead and an octave
    /// marker so the marker layer has something to show
    fn seed_demo_markers(&mut self) {
        let markers = &mut self.editor.markers.markers;
        if markers.get_mut("playhead").is_none() {
            markers.insert("playhead", Marker::new(Axis::Time, 0.0));
        }
        if markers.get_mut("octave").is_none() {
            markers.insert(
                "octave",
                Marker::new(Axis::Track, 0.0).with_repeat(12.0).with_text("C"),
            );
        }
    }
}
