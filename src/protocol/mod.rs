//! # Protocol Implementations
//!
//! Per-protocol packet, header and builder types plus the payload
//! dispatcher that wires layers together.
//!
//! Every protocol repeats the same pattern over its own fixed header
//! layout: parse with bounds/semantic validation, clamp the declared
//! payload length to the available window, route the payload by
//! discriminator, serialize fields back in wire order. Adding a new
//! encapsulated protocol means implementing the pattern and registering a
//! route with the dispatcher; existing decoders are never touched.

pub mod dispatcher;
pub mod eap;
pub mod ieee8021x;
