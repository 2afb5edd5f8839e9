//! # packet-protocol
//!
//! Layered binary packet decoding/encoding framework for captured network
//! traffic, illustrated by IEEE 802.1X (EAPOL) and the EAP frames it can
//! carry.
//!
//! Given an untrusted byte buffer plus an offset/length window the
//! framework validates bounds, parses a fixed-size header into typed
//! fields, resolves the payload decoder through an extensible registry
//! and recursively decodes the payload. The inverse direction builds a
//! packet from explicit field values, optionally recomputing the declared
//! length field from the actual serialized payload size.
//!
//! ## Example
//! ```rust
//! use bytes::Bytes;
//! use packet_protocol::core::named::{EapCode, Ieee8021xType};
//! use packet_protocol::protocol::ieee8021x::Ieee8021xPacket;
//! use packet_protocol::protocol::eap::EapPacket;
//! use packet_protocol::Packet;
//!
//! // EAPOL frame carrying an EAP Response
//! let raw = Bytes::from_static(&[0x01, 0x00, 0x00, 0x04, 0x02, 0x11, 0x00, 0x00]);
//! let packet = Ieee8021xPacket::decode(&raw, 0, raw.len()).unwrap();
//!
//! assert_eq!(packet.header().packet_type(), Ieee8021xType::EapPacket);
//! let eap = packet
//!     .payload()
//!     .and_then(|p| p.as_any().downcast_ref::<EapPacket>())
//!     .unwrap();
//! assert_eq!(eap.header().code(), EapCode::Response);
//! assert_eq!(eap.header().identifier(), 0x11);
//! ```
//!
//! ## Robustness
//! Decoding tolerates real-world malformed captures: inflated declared
//! lengths are clamped to the bytes actually available and unregistered
//! discriminators wrap their payload opaquely. Truncated headers, invalid
//! windows and unregistered strict field values (the 802.1X version) are
//! the only fatal decode errors.

#![deny(missing_docs)]
#![warn(clippy::unwrap_used)]

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::core::packet::{Packet, PacketBuilder, RawPacket};
pub use crate::error::{ProtocolError, Result};
pub use crate::protocol::eap::{EapBuilder, EapPacket};
pub use crate::protocol::ieee8021x::{Ieee8021xBuilder, Ieee8021xPacket};
