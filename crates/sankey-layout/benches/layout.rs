use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sankey_core::{DEFAULT_PALETTE, DataTable, Viewport, build_graph};
use sankey_layout::{LayoutOptions, layout_graph, layout_sankey};
use std::hint::black_box;
use std::time::Duration;

fn build_layered_table(name: &str, columns: usize, per_column: usize) -> DataTable {
    let mut rows = Vec::new();
    for c in 0..columns.saturating_sub(1) {
        for i in 0..per_column {
            // Two links into the next column; the long link below skips one.
            for k in 0..2 {
                let to = (i + k) % per_column;
                rows.push((
                    format!("{name}_c{c}_n{i}"),
                    format!("{name}_c{}_n{to}", c + 1),
                    Some((i % 7 + 1) as f64),
                ));
            }
            if c + 2 < columns {
                rows.push((
                    format!("{name}_c{c}_n{i}"),
                    format!("{name}_c{}_n{i}", c + 2),
                    Some(0.5),
                ));
            }
        }
    }
    DataTable::from_rows(rows)
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("sankey_layout");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("cols_4_n10", 4usize, 10usize),
        ("cols_8_n25", 8usize, 25usize),
        ("cols_12_n50", 12usize, 50usize),
    ];
    let viewport = Viewport::new(1600.0, 1200.0);
    let options = LayoutOptions::default();

    for (name, columns, per_column) in cases {
        let table = build_layered_table(name, columns, per_column);

        group.bench_with_input(BenchmarkId::new("layout_graph", name), &table, |b, table| {
            b.iter_batched(
                || build_graph(table, DEFAULT_PALETTE),
                |mut g| {
                    let pass = layout_graph(black_box(&mut g), viewport, &options);
                    black_box(pass.max_column);
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("layout_sankey", name), &table, |b, table| {
            b.iter(|| {
                let layout = layout_sankey(black_box(table), viewport, &options);
                black_box(layout.nodes.len());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
