#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Edge-case tests for decoding adversarial, truncated and malformed
//! captures. Boundary conditions must degrade gracefully where the
//! contract says so and fail with structured errors everywhere else.

use bytes::Bytes;
use packet_protocol::core::named::{Ieee8021xType, Ieee8021xVersion, NamedNumber};
use packet_protocol::core::packet::RawPacket;
use packet_protocol::error::ProtocolError;
use packet_protocol::protocol::eap::EapPacket;
use packet_protocol::protocol::ieee8021x::Ieee8021xPacket;
use packet_protocol::Packet;

// ============================================================================
// BOUNDS VALIDATION
// ============================================================================

#[test]
fn test_window_outside_buffer_is_rejected() {
    let buf = Bytes::from_static(&[0x01, 0x00, 0x00, 0x00]);

    let err = Ieee8021xPacket::decode(&buf, 2, 4).unwrap_err();
    assert_eq!(
        err,
        ProtocolError::Bounds {
            buf_len: 4,
            offset: 2,
            length: 4,
        }
    );

    assert!(EapPacket::decode(&buf, 4, 1).is_err());
    assert!(EapPacket::decode(&Bytes::new(), 0, 1).is_err());
}

#[test]
fn test_offset_length_overflow_is_rejected() {
    let buf = Bytes::from_static(&[0x01, 0x00, 0x00, 0x00]);
    let err = Ieee8021xPacket::decode(&buf, usize::MAX, 2).unwrap_err();
    assert!(matches!(err, ProtocolError::Bounds { .. }));
}

// ============================================================================
// TRUNCATED HEADERS
// ============================================================================

#[test]
fn test_three_byte_buffer_fails_both_parsers() {
    let buf = Bytes::from_static(&[0x01, 0x00, 0x00]);

    let err = Ieee8021xPacket::decode(&buf, 0, 3).unwrap_err();
    match err {
        ProtocolError::MalformedHeader {
            protocol,
            expected,
            dump,
            offset,
            length,
        } => {
            assert_eq!(protocol, "IEEE 802.1X");
            assert_eq!(expected, 4);
            assert_eq!(dump, "01 00 00");
            assert_eq!(offset, 0);
            assert_eq!(length, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(matches!(
        EapPacket::decode(&buf, 0, 3).unwrap_err(),
        ProtocolError::MalformedHeader { protocol: "EAP", .. }
    ));
}

#[test]
fn test_short_window_in_large_buffer_does_not_read_past_window() {
    // plenty of buffer after the window; the parser must still fail on
    // the 2-byte window instead of peeking beyond it
    let buf = Bytes::from_static(&[0x01, 0x00, 0x00, 0x04, 0x02, 0x11, 0x00, 0x00]);
    let err = Ieee8021xPacket::decode(&buf, 0, 2).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedHeader { length: 2, .. }));
}

// ============================================================================
// STRICT VERSION DOMAIN
// ============================================================================

#[test]
fn test_version_invalid_zero_is_accepted() {
    let buf = Bytes::from_static(&[0x00, 0x00, 0x00, 0x00]);
    let packet = Ieee8021xPacket::decode(&buf, 0, 4).unwrap();
    assert_eq!(packet.header().version(), Ieee8021xVersion::Invalid);
    assert_eq!(packet.header().version().value(), 0);
}

#[test]
fn test_unregistered_version_is_rejected() {
    let buf = Bytes::from_static(&[0x09, 0x00, 0x00, 0x00]);
    assert_eq!(
        Ieee8021xPacket::decode(&buf, 0, 4).unwrap_err(),
        ProtocolError::InvalidVersion(0x09)
    );
}

// ============================================================================
// UNSIGNED LENGTH MASKING
// ============================================================================

#[test]
fn test_length_0xffff_reads_as_65535() {
    let buf = Bytes::from_static(&[0x01, 0x03, 0xff, 0xff]);
    let packet = Ieee8021xPacket::decode(&buf, 0, 4).unwrap();
    assert_eq!(packet.header().length_raw(), 0xffff);
    assert_eq!(packet.header().length_as_usize(), 65535);
    // nothing remains after the header, so the payload is absent
    assert!(packet.payload().is_none());
}

// ============================================================================
// DECLARED LENGTH CLAMPING
// ============================================================================

#[test]
fn test_declared_1000_with_10_available_clamps_to_10() {
    let mut raw = vec![0x01, 0x03, 0x03, 0xe8]; // EAPOL-Key, length=1000
    raw.extend_from_slice(&[0x5a; 10]);
    let buf = Bytes::from(raw);

    let packet = Ieee8021xPacket::decode(&buf, 0, 14).unwrap();
    let payload = packet.payload().expect("clamped payload expected");
    assert_eq!(payload.total_len(), 10);
    assert_eq!(packet.total_len(), 14);
    // the header still reports the inflated declared value
    assert_eq!(packet.header().length_as_usize(), 1000);
}

#[test]
fn test_clamping_applies_recursively() {
    // outer EAPOL length is honest, inner EAP length is inflated
    let buf = Bytes::from_static(&[
        0x01, 0x00, 0x00, 0x06, // EAPOL: EAP-Packet, length=6
        0x01, 0x01, 0xff, 0x00, // EAP: Request, declares 65280
        0xab, 0xcd, // 2 actual payload bytes
    ]);
    let packet = Ieee8021xPacket::decode(&buf, 0, 10).unwrap();
    let eap = packet
        .payload()
        .and_then(|p| p.as_any().downcast_ref::<EapPacket>())
        .expect("EAP payload expected");
    assert_eq!(eap.payload().unwrap().total_len(), 2);
}

// ============================================================================
// UNKNOWN DISCRIMINATOR FALLBACK
// ============================================================================

#[test]
fn test_packet_type_0x7f_decodes_with_opaque_payload() {
    let buf = Bytes::from_static(&[0x01, 0x7f, 0x00, 0x03, 0x0a, 0x0b, 0x0c]);
    let packet = Ieee8021xPacket::decode(&buf, 0, 7).unwrap();

    assert_eq!(packet.header().packet_type(), Ieee8021xType::Unknown(0x7f));
    assert_eq!(packet.header().packet_type().name(), "unknown");
    assert_eq!(
        packet.header().packet_type().to_string(),
        "unknown (0x7f)"
    );

    let raw = packet
        .payload()
        .and_then(|p| p.as_any().downcast_ref::<RawPacket>())
        .expect("unknown discriminator must wrap payload opaquely");
    assert_eq!(raw.data().as_ref(), &[0x0a, 0x0b, 0x0c]);
}

#[test]
fn test_registered_but_unrouted_types_also_fall_back() {
    // EAPOL-Start is a well-known type with no registered payload decoder
    let buf = Bytes::from_static(&[0x01, 0x01, 0x00, 0x02, 0x11, 0x22]);
    let packet = Ieee8021xPacket::decode(&buf, 0, 6).unwrap();
    assert_eq!(packet.header().packet_type(), Ieee8021xType::EapolStart);
    assert!(packet
        .payload()
        .unwrap()
        .as_any()
        .downcast_ref::<RawPacket>()
        .is_some());
}

// ============================================================================
// INNER DECODE FAILURES PROPAGATE
// ============================================================================

#[test]
fn test_eap_payload_shorter_than_eap_header_fails() {
    // EAPOL declares 2 payload bytes routed to the EAP decoder, which
    // needs at least 4
    let buf = Bytes::from_static(&[0x01, 0x00, 0x00, 0x02, 0x02, 0x11]);
    let err = Ieee8021xPacket::decode(&buf, 0, 6).unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::MalformedHeader { protocol: "EAP", .. }
    ));
}

// ============================================================================
// DIAGNOSTIC RENDERING
// ============================================================================

#[test]
fn test_display_dumps_fields_recursively() {
    let buf = Bytes::from_static(&[0x01, 0x00, 0x00, 0x04, 0x02, 0x11, 0x00, 0x00]);
    let packet = Ieee8021xPacket::decode(&buf, 0, 8).unwrap();
    let text = packet.to_string();

    assert!(text.contains("[IEEE 802.1X Header (4 bytes)]"));
    assert!(text.contains("Version: IEEE 802.1X-2001 (0x01)"));
    assert!(text.contains("PacketType: EAP-Packet (0x00)"));
    assert!(text.contains("[EAP Header (4 bytes)]"));
    assert!(text.contains("Code: Response (0x02)"));
    assert!(text.contains("Identifier: 17"));
}
