//! # Core Codec Components
//!
//! Protocol-independent building blocks for layered packet decoding.
//!
//! ## Components
//! - **Named**: Enumerated wire-format field domains with
//!   lookup-or-synthesize semantics
//! - **Packet**: The decode/build contract and the opaque fallback packet
//!
//! ## Safety
//! - Every decoder validates its byte window before reading
//! - Declared lengths are clamped to available bytes, never trusted
//! - Unknown discriminators degrade to opaque payloads, never panic

pub mod named;
pub mod packet;
