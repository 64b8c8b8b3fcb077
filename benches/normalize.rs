// benches/normalize.rs

use compat_scrape::model::Slot;
use compat_scrape::normalize::normalize;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const SAMPLES: &[(Slot, &str)] = &[
    (Slot::Normal, "3.0"),
    (Slot::Normal, "16.0 (16.0)"),
    (Slot::Prefix, "5.0 (5.0)"),
    (Slot::Normal, "(Yes)"),
    (Slot::Normal, "(Yes) [1]"),
    (Slot::Normal, "Not supported"),
    (Slot::Normal, "Not supported (grid media type is not supported)"),
    (Slot::Normal, "Activated on Nightly only (24)"),
    (Slot::Normal, "Partial since 11.0, full since 16.0"),
    (Slot::Normal, "Removed in 23.0 (23.0)"),
    (Slot::Normal, "?"),
    (Slot::Normal, "some free text nothing recognizes"),
];

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_mixed_values", |b| {
        b.iter(|| {
            for (slot, raw) in SAMPLES {
                black_box(normalize(*slot, black_box(raw)));
            }
        })
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
