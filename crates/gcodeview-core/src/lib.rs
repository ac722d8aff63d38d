//! # GCodeView Core
//!
//! Core types, constants, error handling and the event bus shared by the
//! GCodeView crates.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod position;

pub use error::{Error, GcodeError, Result};

pub use event_bus::{
    AppEvent, DiagnosticsEvent, EditSource, EditorEvent, EventBus, EventBusConfig, EventCategory,
    EventFilter, SubscriptionId, VisualizerEvent,
};

pub use position::Position;
