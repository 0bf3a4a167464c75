//! Events emitted by the viewport and editor widget.
//!
//! The viewport emits a change event synchronously on every mutation;
//! the app polls the deferred queue once per frame for side effects
//! (status readout, logging).

use crate::core::event_bus::{Event, EventEmitter};
use crate::core::viewport::Axis;

/// Viewport transform changed (zoom, offset or visible extent)
#[derive(Debug, Clone)]
pub struct ViewportChangedEvent {
    pub axis: Axis,
    pub zoom: f32,
    pub offset: f32,
}

/// Pointer moved over the editor surface, in content coordinates
#[derive(Debug, Clone)]
pub struct CursorMovedEvent {
    pub time: f32,
    pub track: f32,
}

/// Grid snapping toggled from the UI
#[derive(Debug, Clone)]
pub struct SnapToggledEvent {
    pub enabled: bool,
}

/// Event sender handle held by the viewport.
///
/// Wraps an optional emitter so the viewport works standalone (tests,
/// headless use) without an event bus attached.
#[derive(Clone, Default, Debug)]
pub struct ViewEventEmitter {
    inner: Option<EventEmitter>,
}

impl ViewEventEmitter {
    /// Create a no-op emitter (before the event system is wired up)
    pub fn dummy() -> Self {
        Self { inner: None }
    }

    /// Create from an EventBus emitter handle
    pub fn from_emitter(emitter: EventEmitter) -> Self {
        Self { inner: Some(emitter) }
    }

    /// Emit event (no-op if dummy)
    pub fn emit<E: Event + Clone>(&self, event: E) {
        if let Some(ref emitter) = self.inner {
            emitter.emit(event);
        }
    }
}
