//! Pub/Sub event bus for decoupled component communication.
//!
//! emit() invokes subscriber callbacks immediately (synchronously, before
//! returning) AND queues the event for deferred batch processing via poll()
//! in the main loop. Callback order is FIFO within one event type; ordering
//! across different event types is undefined.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use log::warn;

/// Maximum events in the deferred queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

/// Marker trait for events. Events must be Send + Sync + 'static.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

// Blanket impl for all qualifying types
impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Type-erased callback
type Callback = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

/// Shared state behind both `EventBus` and `EventEmitter` handles.
struct Shared {
    subscribers: RwLock<HashMap<TypeId, Vec<Callback>>>,
    queue: Mutex<Vec<BoxedEvent>>,
}

impl Shared {
    fn dispatch<E: Event + Clone>(&self, event: E) {
        // Immediate callbacks
        if let Some(cbs) = self
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&TypeId::of::<E>())
        {
            for cb in cbs {
                cb(&event);
            }
        }

        // Queue for deferred processing, evicting oldest on overflow
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict = queue.len() / 2;
            warn!("Event queue full ({} events), evicting oldest {}", queue.len(), evict);
            queue.drain(0..evict);
        }
        queue.push(Box::new(event));
    }
}

/// Pub/Sub event bus with deferred processing support.
///
/// Two modes that work together:
/// 1. Immediate: subscribe() callbacks fire synchronously inside emit()
/// 2. Deferred: emit() also queues events for poll() in the main loop
#[derive(Clone)]
pub struct EventBus {
    shared: Arc<Shared>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                subscribers: RwLock::new(HashMap::new()),
                queue: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Subscribe to events of type E. The callback is invoked immediately
    /// whenever emit() is called with an E; use Arc<Mutex<_>> inside the
    /// callback for state mutations.
    pub fn subscribe<E, F>(&self, callback: F)
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: Callback = Arc::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                callback(event);
            }
        });
        self.shared
            .subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(TypeId::of::<E>())
            .or_default()
            .push(wrapped);
    }

    /// Emit event: invoke callbacks synchronously, then queue for poll().
    pub fn emit<E: Event + Clone>(&self, event: E) {
        self.shared.dispatch(event);
    }

    /// Drain all queued events for batch processing in the main loop.
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.shared.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Get an emitter handle for passing to components.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Check if there are subscribers for event type E
    pub fn has_subscribers<E: Event>(&self) -> bool {
        self.shared
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&TypeId::of::<E>())
            .map(|v| !v.is_empty())
            .unwrap_or(false)
    }

    /// Current deferred queue length
    pub fn queue_len(&self) -> usize {
        self.shared.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Clear all subscribers and queued events
    pub fn clear(&self) {
        self.shared
            .subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.shared.queue.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

/// Lightweight emitter handle for components that only need to publish.
///
/// Cloneable; shares the subscriber list and queue with its EventBus.
#[derive(Clone)]
pub struct EventEmitter {
    shared: Arc<Shared>,
}

impl EventEmitter {
    /// Emit event: invoke callbacks synchronously, then queue for poll()
    pub fn emit<E: Event + Clone>(&self, event: E) {
        self.shared.dispatch(event);
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field(
                "subscriber_types",
                &self.shared.subscribers.read().map(|s| s.len()).unwrap_or(0),
            )
            .field("queue_len", &self.shared.queue.lock().map(|q| q.len()).unwrap_or(0))
            .finish()
    }
}

/// Helper: downcast a BoxedEvent to a concrete type.
///
/// Must explicitly deref to `dyn Event` before calling `as_any()`; without
/// the deref the blanket impl for `Box<dyn Event>` intercepts the call and
/// the downcast always fails.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    #[derive(Clone, Debug)]
    struct ZoomEvent {
        factor: i32,
    }

    #[derive(Clone, Debug)]
    struct PanEvent {
        axis: &'static str,
    }

    #[test]
    fn test_subscribe_emit_immediate() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicI32::new(0));
        let c = Arc::clone(&counter);

        bus.subscribe::<ZoomEvent, _>(move |e| {
            c.fetch_add(e.factor, Ordering::SeqCst);
        });

        bus.emit(ZoomEvent { factor: 10 });
        // Callback fired synchronously inside emit()
        assert_eq!(counter.load(Ordering::SeqCst), 10);

        bus.emit(ZoomEvent { factor: 5 });
        assert_eq!(counter.load(Ordering::SeqCst), 15);
    }

    #[test]
    fn test_emit_queues_for_poll() {
        let bus = EventBus::new();

        bus.emit(ZoomEvent { factor: 1 });
        bus.emit(ZoomEvent { factor: 2 });
        bus.emit(PanEvent { axis: "time" });

        let events = bus.poll();
        assert_eq!(events.len(), 3);

        // Queue is empty after poll
        assert_eq!(bus.poll().len(), 0);
    }

    #[test]
    fn test_emitter_handle() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicI32::new(0));
        let c = Arc::clone(&counter);

        bus.subscribe::<ZoomEvent, _>(move |e| {
            c.fetch_add(e.factor, Ordering::SeqCst);
        });

        let emitter = bus.emitter();
        emitter.emit(ZoomEvent { factor: 42 });

        assert_eq!(counter.load(Ordering::SeqCst), 42);
        assert_eq!(bus.poll().len(), 1);
    }

    #[test]
    fn test_downcast() {
        let bus = EventBus::new();
        bus.emit(ZoomEvent { factor: 42 });
        bus.emit(PanEvent { axis: "track" });

        let events = bus.poll();
        assert!(downcast_event::<ZoomEvent>(&events[0]).is_some());
        assert!(downcast_event::<PanEvent>(&events[0]).is_none());
        assert_eq!(downcast_event::<PanEvent>(&events[1]).unwrap().axis, "track");
    }

    #[test]
    fn test_queue_eviction() {
        let bus = EventBus::new();
        for i in 0..(MAX_QUEUE_SIZE + 10) {
            bus.emit(ZoomEvent { factor: i as i32 });
        }
        // Never grows past the cap
        assert!(bus.queue_len() <= MAX_QUEUE_SIZE + 1);
    }
}
