//! # Named Wire-Format Domains
//!
//! Each enumerated header field has its own domain of well-known raw
//! values. Domains are closed enums with an explicit `Unknown(u8)` variant
//! instead of runtime-mutated registries: lookup never fails for lenient
//! domains (an unregistered raw value synthesizes `Unknown`), while the
//! 802.1X version domain is deliberately strict and rejects unregistered
//! values. New encapsulated protocols extend the system through the
//! payload dispatcher, not by mutating these domains.
//!
//! All domains order strictly by raw value and render unknown values as
//! hex rather than failing.

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A named member of an enumerated wire-format field domain.
///
/// Identity and ordering are by raw value; the name is a human-readable
/// label for diagnostics only.
pub trait NamedNumber: Copy + Eq {
    /// Raw wire value
    fn value(&self) -> u8;

    /// Human-readable name ("unknown" for unregistered values)
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// EAP code (RFC 3748 Section 4, 1 byte, lenient)
// ---------------------------------------------------------------------------

/// EAP code field domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EapCode {
    /// Request (1)
    Request,
    /// Response (2)
    Response,
    /// Success (3)
    Success,
    /// Failure (4)
    Failure,
    /// Any unregistered raw value
    Unknown(u8),
}

impl EapCode {
    /// Look up the canonical instance for a raw value.
    ///
    /// Never fails: unregistered values synthesize [`EapCode::Unknown`].
    pub fn from_value(value: u8) -> Self {
        match value {
            1 => EapCode::Request,
            2 => EapCode::Response,
            3 => EapCode::Success,
            4 => EapCode::Failure,
            other => EapCode::Unknown(other),
        }
    }
}

impl NamedNumber for EapCode {
    fn value(&self) -> u8 {
        match *self {
            EapCode::Request => 1,
            EapCode::Response => 2,
            EapCode::Success => 3,
            EapCode::Failure => 4,
            EapCode::Unknown(value) => value,
        }
    }

    fn name(&self) -> &'static str {
        match *self {
            EapCode::Request => "Request",
            EapCode::Response => "Response",
            EapCode::Success => "Success",
            EapCode::Failure => "Failure",
            EapCode::Unknown(_) => "unknown",
        }
    }
}

impl PartialOrd for EapCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EapCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl fmt::Display for EapCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04x})", self.name(), self.value())
    }
}

// ---------------------------------------------------------------------------
// 802.1X packet type (1 byte, lenient)
// ---------------------------------------------------------------------------

/// 802.1X packet type field domain: the discriminator selecting the
/// payload decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ieee8021xType {
    /// EAP-Packet (0)
    EapPacket,
    /// EAPOL-Start (1)
    EapolStart,
    /// EAPOL-Logoff (2)
    EapolLogoff,
    /// EAPOL-Key (3)
    EapolKey,
    /// EAPOL-Encapsulated-ASF-Alert (4)
    EapolAsfAlert,
    /// Any unregistered raw value
    Unknown(u8),
}

impl Ieee8021xType {
    /// Look up the canonical instance for a raw value.
    ///
    /// Never fails: unregistered values synthesize
    /// [`Ieee8021xType::Unknown`].
    pub fn from_value(value: u8) -> Self {
        match value {
            0 => Ieee8021xType::EapPacket,
            1 => Ieee8021xType::EapolStart,
            2 => Ieee8021xType::EapolLogoff,
            3 => Ieee8021xType::EapolKey,
            4 => Ieee8021xType::EapolAsfAlert,
            other => Ieee8021xType::Unknown(other),
        }
    }
}

impl NamedNumber for Ieee8021xType {
    fn value(&self) -> u8 {
        match *self {
            Ieee8021xType::EapPacket => 0,
            Ieee8021xType::EapolStart => 1,
            Ieee8021xType::EapolLogoff => 2,
            Ieee8021xType::EapolKey => 3,
            Ieee8021xType::EapolAsfAlert => 4,
            Ieee8021xType::Unknown(value) => value,
        }
    }

    fn name(&self) -> &'static str {
        match *self {
            Ieee8021xType::EapPacket => "EAP-Packet",
            Ieee8021xType::EapolStart => "EAPOL-Start",
            Ieee8021xType::EapolLogoff => "EAPOL-Logoff",
            Ieee8021xType::EapolKey => "EAPOL-Key",
            Ieee8021xType::EapolAsfAlert => "EAPOL-Encapsulated-ASF-Alert",
            Ieee8021xType::Unknown(_) => "unknown",
        }
    }
}

impl PartialOrd for Ieee8021xType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ieee8021xType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl fmt::Display for Ieee8021xType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04x})", self.name(), self.value())
    }
}

// ---------------------------------------------------------------------------
// 802.1X protocol version (1 byte, strict)
// ---------------------------------------------------------------------------

/// 802.1X protocol version field domain.
///
/// Unlike the other domains this one is strict: an unregistered raw value
/// is a hard decode failure. Note that 0 *is* registered (as `Invalid`)
/// and therefore accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ieee8021xVersion {
    /// Invalid (0)
    Invalid,
    /// IEEE 802.1X-2001 (1)
    Ieee8021x2001,
    /// IEEE 802.1X-2004 (2)
    Ieee8021x2004,
    /// IEEE 802.1X-2010 (3)
    Ieee8021x2010,
}

impl Ieee8021xVersion {
    /// Look up the instance for a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidVersion`] for any raw value outside
    /// `0..=3`. This asymmetry with the lenient domains is part of the
    /// decode contract.
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Ieee8021xVersion::Invalid),
            1 => Ok(Ieee8021xVersion::Ieee8021x2001),
            2 => Ok(Ieee8021xVersion::Ieee8021x2004),
            3 => Ok(Ieee8021xVersion::Ieee8021x2010),
            other => Err(ProtocolError::InvalidVersion(other)),
        }
    }
}

impl NamedNumber for Ieee8021xVersion {
    fn value(&self) -> u8 {
        match *self {
            Ieee8021xVersion::Invalid => 0,
            Ieee8021xVersion::Ieee8021x2001 => 1,
            Ieee8021xVersion::Ieee8021x2004 => 2,
            Ieee8021xVersion::Ieee8021x2010 => 3,
        }
    }

    fn name(&self) -> &'static str {
        match *self {
            Ieee8021xVersion::Invalid => "Invalid",
            Ieee8021xVersion::Ieee8021x2001 => "IEEE 802.1X-2001",
            Ieee8021xVersion::Ieee8021x2004 => "IEEE 802.1X-2004",
            Ieee8021xVersion::Ieee8021x2010 => "IEEE 802.1X-2010",
        }
    }
}

impl PartialOrd for Ieee8021xVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ieee8021xVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl fmt::Display for Ieee8021xVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04x})", self.name(), self.value())
    }
}
