//! Deferred event handling for the demo app.

use log::debug;

use crate::app::SeqlineApp;
use crate::core::event_bus::downcast_event;
use crate::core::view_events::{CursorMovedEvent, SnapToggledEvent, ViewportChangedEvent};
use crate::core::viewport::Axis;

impl SeqlineApp {
    /// Drain the event queue once per frame and apply side effects.
    /// Emission is synchronous; this deferred pass only does bookkeeping.
    pub(crate) fn handle_events(&mut self) {
        for event in self.event_bus.poll() {
            if let Some(e) = downcast_event::<ViewportChangedEvent>(&event) {
                debug!(
                    "Viewport changed: {:?} zoom {:.3} offset {:.2}",
                    e.axis, e.zoom, e.offset
                );
            } else if let Some(e) = downcast_event::<CursorMovedEvent>(&event) {
                self.cursor = Some((e.time, e.track));
            } else if let Some(e) = downcast_event::<SnapToggledEvent>(&event) {
                debug!("Snap toggled: {}", e.enabled);
            }
        }
        // Hovering ended without a new cursor event: clear the readout
        if !self.editor.markers.markers.cursor(Axis::Time).visible {
            self.cursor = None;
        }
    }
}
