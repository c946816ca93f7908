use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linedrop_core::{
    dispatch_at_cursor, dispatch_first_line, DispatchSettings, LineDispatcher, NoSelection,
    SlotTable, Variant,
};

fn pasted_block(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("  entry number {}  \n", i))
        .collect()
}

fn bench_single_dispatch(c: &mut Criterion) {
    let buffer = pasted_block(500);
    let slots = vec![String::new(); 64];

    c.bench_function("dispatch_at_cursor::first_line", |b| {
        b.iter(|| dispatch_at_cursor(black_box(&buffer), black_box(18), black_box(&slots)))
    });

    c.bench_function("dispatch_first_line", |b| {
        b.iter(|| dispatch_first_line(black_box(&buffer), black_box(&slots)))
    });
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");

    for lines in [10usize, 100, 1000] {
        let buffer = pasted_block(lines);
        for variant in [Variant::Cursor, Variant::FirstLine] {
            group.bench_with_input(
                BenchmarkId::new(variant.to_string(), lines),
                &buffer,
                |b, buffer| {
                    b.iter(|| {
                        let table = SlotTable::from_values(vec![""; lines]);
                        let mut dispatcher =
                            LineDispatcher::new(table, NoSelection, DispatchSettings::default())
                                .with_buffer(buffer.as_str());
                        black_box(dispatcher.drain(variant))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_single_dispatch, bench_drain);
criterion_main!(benches);
