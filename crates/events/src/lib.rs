//! Domain events and the in-process event bus.
//!
//! Each application declares a closed event enum implementing [`Event`]; its
//! [`EventKind`] tag drives dispatch. Subscribing to a supertype kind, or to
//! [`Topic::Any`], receives every matching subtype event.

pub mod bus;
pub mod event;
pub mod handler;
pub mod recorder;

pub use bus::{EventBus, PublishError};
pub use event::{Event, EventKind, Topic};
pub use handler::{EventHandler, HandlerError};
pub use recorder::EventRecorder;
