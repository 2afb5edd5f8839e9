//! IEEE 802.1X (EAPOL) frames.
//!
//! Wire format (big-endian, 4-byte header):
//!
//! ```text
//! [Version(1)] [PacketType(1)] [Length(2)] [Payload(N)]
//! ```
//!
//! The version field is strict: raw values outside the registered range
//! `0..=3` fail the decode. The packet type is the payload discriminator
//! and is lenient; it routes the payload through the process-wide
//! dispatcher, where only `EAP-Packet` currently has a registered decoder
//! and everything else degrades to an opaque payload.

use crate::core::named::{Ieee8021xType, Ieee8021xVersion, NamedNumber};
use crate::core::packet::{Packet, PacketBuilder};
use crate::error::{ProtocolError, Result};
use crate::protocol::dispatcher;
use crate::utils::bytes as raw_bytes;
use bytes::Bytes;
use std::any::Any;
use std::fmt;
use tracing::debug;

/// Fixed-layout 802.1X header: version, packet type, declared payload
/// length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ieee8021xHeader {
    version: Ieee8021xVersion,
    packet_type: Ieee8021xType,
    length: u16,
}

impl Ieee8021xHeader {
    /// Fixed wire size of the header in bytes
    pub const SIZE: usize = 4;

    const VERSION_OFFSET: usize = 0;
    const PACKET_TYPE_OFFSET: usize = 1;
    const LENGTH_OFFSET: usize = 2;

    fn parse(raw: &[u8], offset: usize, length: usize) -> Result<Self> {
        if length < Self::SIZE {
            return Err(ProtocolError::MalformedHeader {
                protocol: "IEEE 802.1X",
                expected: Self::SIZE,
                dump: raw_bytes::hex_dump(
                    &raw[offset..offset + length],
                    crate::config::decode_policy().max_dump_bytes,
                ),
                offset,
                length,
            });
        }

        Ok(Ieee8021xHeader {
            version: Ieee8021xVersion::from_value(raw_bytes::read_u8(
                raw,
                offset + Self::VERSION_OFFSET,
            ))?,
            packet_type: Ieee8021xType::from_value(raw_bytes::read_u8(
                raw,
                offset + Self::PACKET_TYPE_OFFSET,
            )),
            length: raw_bytes::read_u16_be(raw, offset + Self::LENGTH_OFFSET),
        })
    }

    /// Protocol version (strict domain)
    pub fn version(&self) -> Ieee8021xVersion {
        self.version
    }

    /// Packet type: the payload discriminator
    pub fn packet_type(&self) -> Ieee8021xType {
        self.packet_type
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
        [
            self.version.value(),
            self.packet_type.value(),
            length[0],
            length[1],
        ]
    }
}

impl fmt::Display for Ieee8021xHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[IEEE 802.1X Header ({} bytes)]", self.len())?;
        writeln!(f, "  Version: {}", self.version)?;
        writeln!(f, "  PacketType: {}", self.packet_type)?;
        writeln!(f, "  Length: {}", self.length)
    }
}

/// An immutable decoded or built 802.1X frame.
#[derive(Debug)]
pub struct Ieee8021xPacket {
    header: Ieee8021xHeader,
    payload: Option<Box<dyn Packet>>,
}

impl Ieee8021xPacket {
    /// Decode an 802.1X frame from `length` bytes of `raw` starting at
    /// `offset`.
    ///
    /// The declared payload length is clamped to the bytes remaining
    /// after the header; the payload, when present, is routed through the
    /// process-wide dispatcher by packet type.
    ///
    /// # Errors
    ///
    /// Fails when the window does not fit the buffer, is shorter than the
    /// 4-byte header, or carries an unregistered version value.
    pub fn decode(raw: &Bytes, offset: usize, length: usize) -> Result<Self> {
        raw_bytes::validate_bounds(raw, offset, length)?;

        let header = Ieee8021xHeader::parse(raw, offset, length)?;
        let remaining = length - header.len();
        let mut payload_len = header.length_as_usize();
        if payload_len > remaining {
            debug!(
                declared = payload_len,
                available = remaining,
                "802.1X declared length exceeds available bytes, clamping"
            );
            payload_len = remaining;
        }

        let payload = if payload_len == 0 {
            None
        } else {
            Some(dispatcher::default_dispatcher().dispatch(
                header.packet_type.value(),
                raw,
                offset + header.len(),
                payload_len,
            )?)
        };

        Ok(Ieee8021xPacket { header, payload })
    }

    /// The parsed header.
    pub fn header(&self) -> &Ieee8021xHeader {
        &self.header
    }

    /// Derive a typed builder pre-populated with this packet's fields.
    pub fn to_builder(&self) -> Ieee8021xBuilder {
        Ieee8021xBuilder::from(self)
    }
}

impl Packet for Ieee8021xPacket {
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

impl PartialEq for Ieee8021xPacket {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.payload.as_ref().map(|p| p.to_bytes())
                == other.payload.as_ref().map(|p| p.to_bytes())
    }
}

impl fmt::Display for Ieee8021xPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        if let Some(payload) = &self.payload {
            write!(f, "{payload}")?;
        }
        Ok(())
    }
}

/// Staging object for constructing an [`Ieee8021xPacket`] from explicit
/// field values.
#[derive(Default)]
pub struct Ieee8021xBuilder {
    version: Option<Ieee8021xVersion>,
    packet_type: Option<Ieee8021xType>,
    length: u16,
    correct_length_at_build: bool,
    payload_builder: Option<Box<dyn PacketBuilder>>,
}

impl Ieee8021xBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the version field (required).
    pub fn version(mut self, version: Ieee8021xVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the packet type field.
    pub fn packet_type(mut self, packet_type: Ieee8021xType) -> Self {
        self.packet_type = Some(packet_type);
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
    /// Version is the discriminating field; packet type is deliberately
    /// required as well, since the payload discriminator has no sensible
    /// default byte and serializing without one would emit a meaningless
    /// frame. Checked version-first, so a builder missing both reports
    /// the version.
    ///
    /// # Errors
    ///
    /// Fails with [`ProtocolError::MissingField`] when no version or no
    /// packet type was set, or with the nested builder's error when
    /// building the payload fails.
    pub fn build(&self) -> Result<Ieee8021xPacket> {
        let version = self
            .version
            .ok_or(ProtocolError::MissingField("version"))?;
        let packet_type = self
            .packet_type
            .ok_or(ProtocolError::MissingField("packet_type"))?;

        let payload = match &self.payload_builder {
            Some(builder) => Some(builder.build()?),
            None => None,
        };

        let length = if self.correct_length_at_build {
            (payload.as_ref().map_or(0, |p| p.total_len()) & 0xFFFF) as u16
        } else {
            self.length
        };

        Ok(Ieee8021xPacket {
            header: Ieee8021xHeader {
                version,
                packet_type,
                length,
            },
            payload,
        })
    }
}

/// Pre-populate a builder from an existing packet, including a
/// recursively derived payload builder.
impl From<&Ieee8021xPacket> for Ieee8021xBuilder {
    fn from(packet: &Ieee8021xPacket) -> Self {
        Ieee8021xBuilder {
            version: Some(packet.header.version),
            packet_type: Some(packet.header.packet_type),
            length: packet.header.length,
            correct_length_at_build: false,
            payload_builder: packet.payload.as_ref().map(|p| p.builder()),
        }
    }
}

impl PacketBuilder for Ieee8021xBuilder {
    fn build(&self) -> Result<Box<dyn Packet>> {
        Ieee8021xBuilder::build(self).map(|p| Box::new(p) as Box<dyn Packet>)
    }
}
