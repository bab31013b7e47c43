use bitfec::ecc::{flip_bits, BlockCodec, Variant};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("block encode");
    for variant in [Variant::Single, Variant::Double] {
        let codec = BlockCodec::new(variant);
        group.bench_with_input(
            BenchmarkId::from_parameter(variant),
            &codec,
            |b, codec| b.iter(|| codec.encode(black_box(0x9A))),
        );
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("block decode");
    // Error patterns passed as arguments, from a clean word up to the design limit
    let cases: [(Variant, &[usize]); 5] = [
        (Variant::Single, &[]),
        (Variant::Single, &[3]),
        (Variant::Double, &[]),
        (Variant::Double, &[5]),
        (Variant::Double, &[14, 15]),
    ];

    for (variant, positions) in cases {
        let codec = BlockCodec::new(variant);
        let corrupted = flip_bits(&codec.encode(0x9A), positions).unwrap();
        group.bench_with_input(
            BenchmarkId::new(variant.to_string(), format!("{:?}", positions)),
            &corrupted,
            |b, word| b.iter(|| codec.decode_word(black_box(word)).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
