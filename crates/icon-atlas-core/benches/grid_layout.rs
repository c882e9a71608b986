use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use icon_atlas_core::prelude::*;
use std::hint::black_box;

fn generate_icons(count: usize, cell: u32) -> Vec<ImageRecord> {
    (0..count)
        .flat_map(|i| {
            [Theme::Dark, Theme::Light].map(|theme| {
                ImageRecord::new(format!("{theme}/Standard/icon_{i}.png"), cell, cell, theme)
            })
        })
        .collect()
}

fn bench_plan_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_pages");

    for (count, cell) in [(100usize, 16u32), (500, 48), (2000, 64)] {
        let icons = generate_icons(count, cell);
        group.throughput(Throughput::Elements(icons.len() as u64));
        group.bench_with_input(
            BenchmarkId::new(format!("cell{cell}"), icons.len()),
            &icons,
            |b, icons| {
                b.iter(|| black_box(plan_pages(icons, 1024).map(|p| p.len())));
            },
        );
    }

    group.finish();
}

fn bench_ordering_table(c: &mut Criterion) {
    let ordering: NameOrdering = (0..1000).map(|i| format!("Icon{i}")).collect();
    c.bench_function("format_table_1000", |b| {
        b.iter(|| black_box(ordering.format_table(4)))
    });
}

criterion_group!(benches, bench_plan_pages, bench_ordering_table);
criterion_main!(benches);
