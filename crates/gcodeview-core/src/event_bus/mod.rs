//! # Event Bus Module
//!
//! Decoupled communication between the core and the collaborators around it
//! (text-editing surface, rendering surface, diagnostics panel).
//!
//! ## Usage
//!
//! ```rust
//! use gcodeview_core::event_bus::{AppEvent, EditorEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Editor]),
//!     |event| {
//!         if let AppEvent::Editor(EditorEvent::LineSelected { line }) = event {
//!             println!("highlight line {}", line);
//!         }
//!     },
//! );
//!
//! bus.publish(AppEvent::Editor(EditorEvent::LineSelected { line: 3 }));
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
