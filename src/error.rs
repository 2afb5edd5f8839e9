//! # Error Types
//!
//! Comprehensive error handling for packet decoding and building.
//!
//! This module defines all error variants that can occur while decoding
//! captured raw data or rebuilding packets from field values.
//!
//! ## Error Categories
//! - **Bounds Errors**: Requested window does not fit the supplied buffer
//! - **Malformed Data**: Truncated headers, invalid strict field values
//! - **Builder Errors**: Required fields missing at build time
//! - **Configuration Errors**: Invalid decode-policy configuration
//!
//! Two conditions are deliberately *not* errors: a declared payload length
//! exceeding the available bytes (the decoder clamps to what remains), and
//! a discriminator with no registered decoder (the payload is wrapped
//! opaquely). Both degrade gracefully instead of aborting the decode chain.
//!
//! All errors implement `std::error::Error` for interoperability.

use thiserror::Error;

/// ProtocolError is the primary error type for all decode/build operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The requested offset/length window does not address a valid
    /// sub-range of the supplied buffer. Always fatal to the decode call.
    #[error(
        "raw data out of bounds: buffer length {buf_len}, offset {offset}, length {length}"
    )]
    Bounds {
        /// Length of the supplied buffer
        buf_len: usize,
        /// Requested start offset
        offset: usize,
        /// Requested window length
        length: usize,
    },

    /// The byte window is too short to hold the protocol's fixed header.
    /// Carries a hex dump of the offending region for diagnostics.
    #[error(
        "the data is too short to build a {protocol} header ({expected} bytes). \
         data: {dump}, offset: {offset}, length: {length}"
    )]
    MalformedHeader {
        /// Protocol whose header failed to parse
        protocol: &'static str,
        /// Fixed header size the protocol requires
        expected: usize,
        /// Spaced hex dump of the offending window (capped)
        dump: String,
        /// Offset of the window within the buffer
        offset: usize,
        /// Length of the window
        length: usize,
    },

    /// A declared length field reinterprets to an impossible quantity.
    /// Length fields are masked to their unsigned wire range when read, so
    /// this only fires for protocols whose declared length must cover a
    /// minimum and falls short of it.
    #[error("the value of the length field seems to be wrong: {0}")]
    MalformedLength(i64),

    /// Strict field domain rejected an unregistered raw value.
    /// Only the 802.1X version field uses this policy; the other field
    /// domains synthesize "unknown" instances instead.
    #[error("invalid 802.1X version value: {0:#04x}")]
    InvalidVersion(u8),

    /// A builder was asked to build without its protocol-discriminating
    /// field set.
    #[error("required builder field missing: {0}")]
    MissingField(&'static str),

    /// Dispatcher registry lock failure
    #[error("dispatcher error: {0}")]
    Dispatcher(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
