//! Domain events module.
//!
//! Provides domain event types and the sink trait the state stores use to
//! notify subscribers after successful mutations. Runtime adapters (HTTP
//! server, tests) implement the sink to translate events into
//! platform-specific actions.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
