use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rnc::{pack_bytes, pack_verified};
use std::hint::black_box;
use std::time::Duration;

fn generate_test_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
            base.iter().copied().cycle().take(size).collect()
        }
        "binary" => (0..size).map(|i| ((i * 17 + 11) % 256) as u8).collect(),
        "sparse" => {
            // Mostly zeros with short records, like level and sprite data
            (0..size)
                .map(|i| if i % 64 < 6 { (i / 64) as u8 } else { 0 })
                .collect()
        }
        "random" => {
            let mut x = 0x2545_F491u32;
            (0..size)
                .map(|_| {
                    x ^= x << 13;
                    x ^= x >> 17;
                    x ^= x << 5;
                    (x >> 24) as u8
                })
                .collect()
        }
        _ => panic!("Unknown pattern: {}", pattern),
    }
}

fn packing_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("packing_throughput");
    group.measurement_time(Duration::from_secs(10));

    // The header holds at most 255 blocks of 8 KB
    for size in [1024, 10240, 102400, 1048576].iter() {
        let size_label = match *size {
            1024 => "1KB",
            10240 => "10KB",
            102400 => "100KB",
            1048576 => "1MB",
            _ => "unknown",
        };

        for pattern in ["text", "binary", "sparse", "random"].iter() {
            let data = generate_test_data(*size, pattern);
            let benchmark_id = BenchmarkId::from_parameter(format!("{}/{}", size_label, pattern));

            group.throughput(Throughput::Bytes(*size as u64));
            group.bench_with_input(benchmark_id, &data, |b, data| {
                b.iter(|| pack_bytes(black_box(data)).expect("Packing failed"));
            });
        }
    }

    group.finish();
}

fn verified_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("verified_packing");
    group.measurement_time(Duration::from_secs(5));

    // Random data is left out: its leeway does not fit the header
    for pattern in ["text", "binary", "sparse"].iter() {
        let data = generate_test_data(102400, pattern);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pattern), &data, |b, data| {
            b.iter(|| pack_verified(black_box(data)).expect("Packing failed"));
        });
    }

    group.finish();
}

criterion_group!(benches, packing_throughput, verified_packing);
criterion_main!(benches);
