use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rnc::{pack_bytes, unpack_bytes};
use std::hint::black_box;
use std::time::Duration;

fn generate_test_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
            base.iter().copied().cycle().take(size).collect()
        }
        "binary" => (0..size).map(|i| ((i * 17 + 11) % 256) as u8).collect(),
        "json" => {
            let template = br#"{"id":123,"name":"Example","values":[1,2,3,4,5],"active":true},"#;
            template.iter().copied().cycle().take(size).collect()
        }
        _ => panic!("Unknown pattern: {pattern}"),
    }
}

fn unpacking_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("unpacking_throughput");
    group.measurement_time(Duration::from_secs(10));

    for size in [10240, 102400, 1048576].iter() {
        let size_label = match *size {
            10240 => "10KB",
            102400 => "100KB",
            1048576 => "1MB",
            _ => "unknown",
        };

        for pattern in ["text", "binary", "json"].iter() {
            let packed = pack_bytes(&generate_test_data(*size, pattern)).expect("Packing failed");
            let benchmark_id = BenchmarkId::from_parameter(format!("{size_label}/{pattern}"));

            group.throughput(Throughput::Bytes(*size as u64));
            group.bench_with_input(benchmark_id, &packed, |b, packed| {
                b.iter(|| unpack_bytes(black_box(packed)).expect("Unpacking failed"));
            });
        }
    }

    group.finish();
}

fn round_trip_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip_throughput");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    for size in [1024, 10240, 102400].iter() {
        for pattern in ["text", "binary", "json"].iter() {
            let data = generate_test_data(*size, pattern);
            let benchmark_id = BenchmarkId::from_parameter(format!("{size}/{pattern}"));

            group.throughput(Throughput::Bytes(*size as u64));
            group.bench_with_input(benchmark_id, &data, |b, data| {
                b.iter(|| {
                    let packed = pack_bytes(black_box(data)).expect("Packing failed");
                    let unpacked = unpack_bytes(black_box(&packed)).expect("Unpacking failed");
                    assert_eq!(data.len(), unpacked.len());
                    unpacked
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, unpacking_throughput, round_trip_throughput);
criterion_main!(benches);
