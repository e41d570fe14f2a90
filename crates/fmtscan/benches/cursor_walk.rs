//! Benchmark: one scan call per record, for each cursor kind.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fmtscan::{Cursor, ScanOptions, SliceStream, args, scan_with};

/// Produce `records` lines of `<int> <word> <float>`.
fn make_records(records: usize) -> String {
    let mut s = String::with_capacity(records * 24);
    for i in 0..records {
        s.push_str(&format!("{i} item{} {}.5\n", i % 97, i % 13));
    }
    s
}

fn scan_all(input: &str, cursor: &Cursor<'_>) -> usize {
    let mut stream = SliceStream::new(input);
    let mut scanned = 0;
    loop {
        let mut id = 0u64;
        let mut word = String::new();
        let mut weight = 0f64;
        let store = args![&mut id, &mut word, &mut weight];
        match scan_with(&mut stream, cursor.clone(), &store, ScanOptions::default()) {
            Ok(n) => scanned += n,
            Err(_) => break,
        }
    }
    scanned
}

fn bench_cursors(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor_walk");
    for records in [16, 256, 4096] {
        let input = make_records(records);
        group.throughput(Throughput::Bytes(input.len() as u64));
        for (name, cursor) in [
            ("brace", Cursor::brace("{} {} {}")),
            ("percent", Cursor::percent("%lu %s %lf")),
            ("positional", Cursor::positional(3)),
        ] {
            group.bench_with_input(BenchmarkId::new(name, records), &input, |b, input| {
                b.iter(|| scan_all(black_box(input), &cursor));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_cursors);
criterion_main!(benches);
