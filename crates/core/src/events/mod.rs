//! Domain events module.
//!
//! Provides the event types and sink trait through which the core surfaces
//! user-visible notices (refresh outcomes, coerced statuses, failed
//! mutations) without depending on any rendering layer.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
