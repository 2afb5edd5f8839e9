//! # Packet Abstractions
//!
//! The decoding/building contract every protocol layer implements, plus
//! the opaque fallback packet.
//!
//! A decoded packet is an immutable composite: a fixed-layout header and
//! an optional payload which is itself a full packet, recursively. After
//! construction nothing mutates; changing a field means deriving a new
//! builder from the existing instance and building a fresh packet.
//!
//! ## Components
//! - **Packet**: Object-safe trait over decoded/built packets
//! - **PacketBuilder**: Object-safe seam for nested payload builders
//! - **RawPacket**: Opaque leaf wrapping uninterpreted bytes

use crate::error::Result;
use crate::utils::bytes as raw_bytes;
use bytes::Bytes;
use std::any::Any;
use std::fmt;

/// An immutable decoded or built packet.
///
/// Implementations are freely shareable across threads; decode and build
/// are purely computational and complete synchronously.
pub trait Packet: fmt::Debug + fmt::Display + Send + Sync {
    /// Total wire length in bytes: header length plus payload length.
    fn total_len(&self) -> usize;

    /// Serialize the packet back to wire bytes. Always produces exactly
    /// `total_len()` bytes, field values verbatim (a deliberately wrong
    /// declared-length field survives re-serialization).
    fn to_bytes(&self) -> Vec<u8>;

    /// The decoded payload packet, if one is present.
    fn payload(&self) -> Option<&dyn Packet>;

    /// Derive a builder pre-populated with this packet's fields, including
    /// a recursively derived payload builder.
    fn builder(&self) -> Box<dyn PacketBuilder>;

    /// Downcasting support for callers that need the concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// Mutable staging object producing an immutable [`Packet`].
///
/// Builders are single-owner: one logical construction flow owns the
/// builder until `build()` is called.
pub trait PacketBuilder: Send {
    /// Build the packet, recursively building any nested payload builder
    /// first.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::error::ProtocolError::MissingField`] when the
    /// protocol's discriminating field was never set.
    fn build(&self) -> Result<Box<dyn Packet>>;
}

/// Compare two packets by the bytes they serialize to.
///
/// For the fixed-layout protocols in this crate, wire equality is field
/// equality.
pub fn same_wire(a: &dyn Packet, b: &dyn Packet) -> bool {
    a.to_bytes() == b.to_bytes()
}

/// Opaque leaf packet: bytes captured off the wire that no registered
/// decoder claimed, wrapped without interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPacket {
    data: Bytes,
}

impl RawPacket {
    /// Wrap `length` bytes starting at `offset` without interpretation.
    ///
    /// # Errors
    ///
    /// Fails only when the window does not fit the buffer.
    pub fn decode(raw: &Bytes, offset: usize, length: usize) -> Result<Self> {
        raw_bytes::validate_bounds(raw, offset, length)?;
        Ok(RawPacket {
            data: raw.slice(offset..offset + length),
        })
    }

    /// Wrap already-owned bytes.
    pub fn from_bytes(data: Bytes) -> Self {
        RawPacket { data }
    }

    /// The wrapped bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl Packet for RawPacket {
    fn total_len(&self) -> usize {
        self.data.len()
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    fn payload(&self) -> Option<&dyn Packet> {
        None
    }

    fn builder(&self) -> Box<dyn PacketBuilder> {
        Box::new(RawBuilder {
            data: self.data.clone(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for RawPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[data ({} bytes)]", self.data.len())?;
        writeln!(
            f,
            "  Hex stream: {}",
            raw_bytes::to_hex_string(&self.data, " ")
        )
    }
}

/// Builder counterpart of [`RawPacket`]: reproduces the wrapped bytes
/// verbatim.
#[derive(Debug, Clone, Default)]
pub struct RawBuilder {
    data: Bytes,
}

impl RawBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bytes to wrap.
    pub fn data(mut self, data: Bytes) -> Self {
        self.data = data;
        self
    }
}

impl PacketBuilder for RawBuilder {
    fn build(&self) -> Result<Box<dyn Packet>> {
        Ok(Box::new(RawPacket {
            data: self.data.clone(),
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn raw_packet_wraps_window_verbatim() {
        let buf = Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef, 0x01]);
        let packet = RawPacket::decode(&buf, 1, 3).unwrap();
        assert_eq!(packet.total_len(), 3);
        assert_eq!(packet.to_bytes(), vec![0xad, 0xbe, 0xef]);
        assert!(packet.payload().is_none());
    }

    #[test]
    fn raw_packet_rejects_bad_window() {
        let buf = Bytes::from_static(&[0x00, 0x01]);
        let err = RawPacket::decode(&buf, 1, 4).unwrap_err();
        assert!(matches!(err, ProtocolError::Bounds { .. }));
    }

    #[test]
    fn raw_builder_round_trips() {
        let buf = Bytes::from_static(&[1, 2, 3]);
        let packet = RawPacket::decode(&buf, 0, 3).unwrap();
        let rebuilt = packet.builder().build().unwrap();
        assert!(same_wire(&packet, rebuilt.as_ref()));
    }

    #[test]
    fn display_shows_hex_stream() {
        let packet = RawPacket::from_bytes(Bytes::from_static(&[0x0a, 0x7f]));
        let text = packet.to_string();
        assert!(text.contains("[data (2 bytes)]"));
        assert!(text.contains("Hex stream: 0a 7f"));
    }
}
