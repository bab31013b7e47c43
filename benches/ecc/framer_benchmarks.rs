use bitfec::ecc::{corrupt_stream, Framer, FramerConfig, Variant};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_buffer(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(len as u64);
    (0..len).map(|_| rng.gen()).collect()
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");
    let mut rng = StdRng::seed_from_u64(1);

    for size in [1024usize, 64 * 1024] {
        let data = random_buffer(size);
        group.throughput(Throughput::Bytes(size as u64));

        for variant in [Variant::Single, Variant::Double] {
            for parallel in [false, true] {
                let framer = Framer::new(FramerConfig::new(variant).with_parallel(parallel));
                let mode = if parallel { "parallel" } else { "sequential" };
                let encoded = framer.encode(&data);
                let corrupted =
                    corrupt_stream(&encoded, variant, variant.correctable_errors(), &mut rng)
                        .unwrap();

                group.bench_with_input(
                    BenchmarkId::new(format!("encode {} {}", variant, mode), size),
                    &data,
                    |b, data| b.iter(|| framer.encode(black_box(data))),
                );
                group.bench_with_input(
                    BenchmarkId::new(format!("decode {} {}", variant, mode), size),
                    &corrupted,
                    |b, corrupted| b.iter(|| framer.decode(black_box(corrupted)).unwrap()),
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, bench_stream);
criterion_main!(benches);
