//! EAP (Extensible Authentication Protocol) frames.
//!
//! Wire format (big-endian, 4-byte header):
//!
//! ```text
//! [Code(1)] [Identifier(1)] [Length(2)] [Payload(N)]
//! ```
//!
//! The code field is lenient: unregistered values decode as unknown
//! instances. The declared length asserts the payload byte count and is
//! clamped to the bytes actually available, tolerating truncated or
//! inflated captures. EAP defines no further demuxed sub-protocol here,
//! so the payload is always wrapped opaquely.

use crate::core::named::{EapCode, NamedNumber};
use crate::core::packet::{Packet, PacketBuilder, RawPacket};
use crate::error::{ProtocolError, Result};
use crate::utils::bytes as raw_bytes;
use bytes::Bytes;
use std::any::Any;
use std::fmt;
use tracing::debug;

/// Fixed-layout EAP header: code, identifier, declared payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EapHeader {
    code: EapCode,
    identifier: u8,
    length: u16,
}

impl EapHeader {
    /// Fixed wire size of the header in bytes
    pub const SIZE: usize = 4;

    const CODE_OFFSET: usize = 0;
    const IDENTIFIER_OFFSET: usize = 1;
    const LENGTH_OFFSET: usize = 2;

    fn parse(raw: &[u8], offset: usize, length: usize) -> Result<Self> {
        if length < Self::SIZE {
            return Err(ProtocolError::MalformedHeader {
                protocol: "EAP",
                expected: Self::SIZE,
                dump: raw_bytes::hex_dump(
                    &raw[offset..offset + length],
                    crate::config::decode_policy().max_dump_bytes,
                ),
                offset,
                length,
            });
        }

        Ok(EapHeader {
            code: EapCode::from_value(raw_bytes::read_u8(raw, offset + Self::CODE_OFFSET)),
            identifier: raw_bytes::read_u8(raw, offset + Self::IDENTIFIER_OFFSET),
            length: raw_bytes::read_u16_be(raw, offset + Self::LENGTH_OFFSET),
        })
    }

    /// EAP code (Request, Response, Success, Failure or unknown)
    pub fn code(&self) -> EapCode {
        self.code
    }

    /// Opaque identifier byte matching requests with responses
    pub fn identifier(&self) -> u8 {
        self.identifier
    }

    /// Declared payload length exactly as stored on the wire
    pub fn length_raw(&self) -> u16 {
        self.length
    }

    /// Declared payload length widened without sign extension:
    /// raw bits `0xFFFF` read as 65535, never -1.
    pub fn length_as_usize(&self) -> usize {
        usize::from(self.length)
    }

    /// Header byte count. Always [`Self::SIZE`], independent of field
    /// values.
    pub fn len(&self) -> usize {
        Self::SIZE
    }

    /// Whether the header occupies zero bytes (it never does).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Serialize the fields in wire order.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let length = self.length.to_be_bytes();
        [self.code.value(), self.identifier, length[0], length[1]]
    }
}

impl fmt::Display for EapHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[EAP Header ({} bytes)]", self.len())?;
        writeln!(f, "  Code: {}", self.code)?;
        writeln!(f, "  Identifier: {}", self.identifier)?;
        writeln!(f, "  Length: {}", self.length)
    }
}

/// An immutable decoded or built EAP frame.
#[derive(Debug)]
pub struct EapPacket {
    header: EapHeader,
    payload: Option<Box<dyn Packet>>,
}

impl EapPacket {
    /// Decode an EAP frame from `length` bytes of `raw` starting at
    /// `offset`.
    ///
    /// The declared payload length is clamped to the bytes remaining
    /// after the header; the payload, when present, is always wrapped
    /// opaquely (EAP carries no further demuxed sub-protocol here).
    ///
    /// # Errors
    ///
    /// Fails when the window does not fit the buffer or is shorter than
    /// the 4-byte header.
    pub fn decode(raw: &Bytes, offset: usize, length: usize) -> Result<Self> {
        raw_bytes::validate_bounds(raw, offset, length)?;

        let header = EapHeader::parse(raw, offset, length)?;
        let remaining = length - header.len();
        let mut payload_len = header.length_as_usize();
        if payload_len > remaining {
            debug!(
                declared = payload_len,
                available = remaining,
                "EAP declared length exceeds available bytes, clamping"
            );
            payload_len = remaining;
        }

        let payload: Option<Box<dyn Packet>> = if payload_len == 0 {
            None
        } else {
            Some(Box::new(RawPacket::decode(
                raw,
                offset + header.len(),
                payload_len,
            )?))
        };

        Ok(EapPacket { header, payload })
    }

    /// The parsed header.
    pub fn header(&self) -> &EapHeader {
        &self.header
    }

    /// Derive a typed builder pre-populated with this packet's fields.
    pub fn to_builder(&self) -> EapBuilder {
        EapBuilder::from(self)
    }
}

impl Packet for EapPacket {
    fn total_len(&self) -> usize {
        self.header.len() + self.payload.as_ref().map_or(0, |p| p.total_len())
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.total_len());
        buf.extend_from_slice(&self.header.to_bytes());
        if let Some(payload) = &self.payload {
            buf.extend_from_slice(&payload.to_bytes());
        }
        buf
    }

    fn payload(&self) -> Option<&dyn Packet> {
        self.payload.as_deref()
    }

    fn builder(&self) -> Box<dyn PacketBuilder> {
        Box::new(self.to_builder())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PartialEq for EapPacket {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.payload.as_ref().map(|p| p.to_bytes())
                == other.payload.as_ref().map(|p| p.to_bytes())
    }
}

impl fmt::Display for EapPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        if let Some(payload) = &self.payload {
            write!(f, "{payload}")?;
        }
        Ok(())
    }
}

/// Staging object for constructing an [`EapPacket`] from explicit field
/// values.
#[derive(Default)]
pub struct EapBuilder {
    code: Option<EapCode>,
    identifier: u8,
    length: u16,
    correct_length_at_build: bool,
    payload_builder: Option<Box<dyn PacketBuilder>>,
}

impl EapBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the code field (required).
    pub fn code(mut self, code: EapCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the identifier byte.
    pub fn identifier(mut self, identifier: u8) -> Self {
        self.identifier = identifier;
        self
    }

    /// Set the declared length field verbatim. Ignored when
    /// `correct_length_at_build` is enabled.
    pub fn length(mut self, length: u16) -> Self {
        self.length = length;
        self
    }

    /// Recompute the length field from the built payload's byte count at
    /// build time, discarding any value set via [`Self::length`].
    pub fn correct_length_at_build(mut self, correct: bool) -> Self {
        self.correct_length_at_build = correct;
        self
    }

    /// Set a nested payload builder.
    pub fn payload_builder(mut self, builder: Box<dyn PacketBuilder>) -> Self {
        self.payload_builder = Some(builder);
        self
    }

    /// Build the packet.
    ///
    /// # Errors
    ///
    /// Fails with [`ProtocolError::MissingField`] when no code was set,
    /// or with the nested builder's error when building the payload fails.
    pub fn build(&self) -> Result<EapPacket> {
        let code = self.code.ok_or(ProtocolError::MissingField("code"))?;

        let payload = match &self.payload_builder {
            Some(builder) => Some(builder.build()?),
            None => None,
        };

        let length = if self.correct_length_at_build {
            (payload.as_ref().map_or(0, |p| p.total_len()) & 0xFFFF) as u16
        } else {
            self.length
        };

        Ok(EapPacket {
            header: EapHeader {
                code,
                identifier: self.identifier,
                length,
            },
            payload,
        })
    }
}

/// Pre-populate a builder from an existing packet, including a
/// recursively derived payload builder.
impl From<&EapPacket> for EapBuilder {
    fn from(packet: &EapPacket) -> Self {
        EapBuilder {
            code: Some(packet.header.code),
            identifier: packet.header.identifier,
            length: packet.header.length,
            correct_length_at_build: false,
            payload_builder: packet.payload.as_ref().map(|p| p.builder()),
        }
    }
}

impl PacketBuilder for EapBuilder {
    fn build(&self) -> Result<Box<dyn Packet>> {
        EapBuilder::build(self).map(|p| Box::new(p) as Box<dyn Packet>)
    }
}
