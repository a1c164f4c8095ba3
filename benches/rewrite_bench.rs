//! Benchmarks for cssurl.
//!
//! Run with:
//!     cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use bytes::Bytes;
use cssurl::{Collector, LineAssembler, UrlRewriteStream, WriteSink, map_urls};

/// Deterministic stylesheet of roughly `size` bytes.
fn stylesheet(size: usize) -> String {
    let mut css = String::with_capacity(size + 64);
    let mut i = 0usize;
    while css.len() < size {
        match i % 3 {
            0 => css.push_str(&format!(".icon-{i}{{background:url(img/icon-{i}.png)}}\n")),
            1 => css.push_str(&format!(".c-{i}{{color:#{:06x};margin:0 auto}}\n", i * 7919)),
            _ => css.push_str(&format!("@font-face{{src:url('fonts/f{i}.woff2')}}\n")),
        }
        i += 1;
    }
    css
}

fn bench_push_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_size");
    let size = 1024 * 1024; // 1 MB
    let css = Bytes::from(stylesheet(size));

    group.throughput(Throughput::Bytes(css.len() as u64));
    for push in [64, 4 * 1024, 64 * 1024] {
        group.bench_function(format!("push_{push}b"), |b| {
            b.iter(|| {
                let replacer = map_urls(|url| format!("https://cdn.example.com/{url}"));
                let mut stream = UrlRewriteStream::new(replacer, Collector::default());
                let mut offset = 0;
                while offset < css.len() {
                    let end = (offset + push).min(css.len());
                    stream.push(css.slice(offset..end)).unwrap();
                    offset = end;
                }
                stream.finish().unwrap();
                black_box(stream.into_sink().output.len())
            });
        });
    }

    group.finish();
}

fn bench_assembler(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembler");
    let size = 1024 * 1024;
    let css = Bytes::from(stylesheet(size));

    group.throughput(Throughput::Bytes(css.len() as u64));
    group.bench_function("line_split_8k", |b| {
        b.iter(|| {
            let mut assembler = LineAssembler::default();
            let mut batches = 0usize;
            for start in (0..css.len()).step_by(8192) {
                let end = (start + 8192).min(css.len());
                if assembler.push(black_box(css.slice(start..end))).is_some() {
                    batches += 1;
                }
            }
            batches += assembler.finish().is_some() as usize;
            black_box(batches)
        });
    });

    group.finish();
}

fn bench_pipe(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipe");
    let size = 1024 * 1024;
    let css = stylesheet(size);

    group.throughput(Throughput::Bytes(css.len() as u64));
    group.bench_function("identity_to_vec", |b| {
        b.iter(|| {
            let cursor = std::io::Cursor::new(black_box(css.as_bytes()));
            let mut stream =
                UrlRewriteStream::new(map_urls(str::to_owned), WriteSink::new(Vec::new()));
            stream.pipe(cursor).unwrap();
            black_box(stream.into_sink().written())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_push_sizes, bench_assembler, bench_pipe);
criterion_main!(benches);
