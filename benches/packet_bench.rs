use bytes::Bytes;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use packet_protocol::core::named::{EapCode, Ieee8021xType, Ieee8021xVersion};
use packet_protocol::core::packet::RawBuilder;
use packet_protocol::protocol::eap::EapBuilder;
use packet_protocol::protocol::ieee8021x::{Ieee8021xBuilder, Ieee8021xPacket};
use packet_protocol::Packet;

#[allow(clippy::unwrap_used)]
fn bench_packet_decode_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_decode_build");
    let payload_sizes = [0usize, 64, 512, 4096, 65000];

    for &size in &payload_sizes {
        let built = Ieee8021xBuilder::new()
            .version(Ieee8021xVersion::Ieee8021x2001)
            .packet_type(Ieee8021xType::EapPacket)
            .payload_builder(Box::new(
                EapBuilder::new()
                    .code(EapCode::Request)
                    .identifier(1)
                    .payload_builder(Box::new(RawBuilder::new().data(Bytes::from(vec![0u8; size]))))
                    .correct_length_at_build(true),
            ))
            .correct_length_at_build(true)
            .build()
            .unwrap();
        let wire = Bytes::from(built.to_bytes());

        group.throughput(Throughput::Bytes(wire.len() as u64));
        group.bench_function(format!("decode_{size}b"), |b| {
            b.iter(|| {
                let decoded = Ieee8021xPacket::decode(&wire, 0, wire.len());
                assert!(decoded.is_ok());
            })
        });
        group.bench_function(format!("serialize_{size}b"), |b| {
            b.iter(|| {
                let bytes = built.to_bytes();
                assert_eq!(bytes.len(), wire.len());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_packet_decode_build);
criterion_main!(benches);
