//! UI widgets - self-contained components that read shared state and
//! communicate with the host via actions and the EventBus.

pub mod editor;
