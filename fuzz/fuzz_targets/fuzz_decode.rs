#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use packet_protocol::protocol::eap::EapPacket;
use packet_protocol::protocol::ieee8021x::Ieee8021xPacket;

fuzz_target!(|data: &[u8]| {
    // Fuzz both decode entry points - test for panics, overruns, infinite loops
    let buf = Bytes::copy_from_slice(data);
    let _ = Ieee8021xPacket::decode(&buf, 0, buf.len());
    let _ = EapPacket::decode(&buf, 0, buf.len());
});
