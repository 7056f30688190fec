use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dashboard_core::{
    pagination::{page_slice, total_pages},
    search::filter_symbols,
    SymbolDetail, PAGE_SIZE,
};

fn universe(size: usize) -> Vec<SymbolDetail> {
    (0..size)
        .map(|idx| SymbolDetail {
            symbol: format!("SYM{idx:05}"),
            short_name: format!("Company {idx}"),
            long_name: format!("Company {idx} Holdings Corporation"),
            price: 100.0 + idx as f64 * 0.25,
            change: if idx % 2 == 0 { "+1.25".into() } else { "-0.75".into() },
            change_percent: "+0.50%".into(),
            volume: Some("1.2M".into()),
            market_cap: None,
            currency_symbol: "$".into(),
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let symbols = universe(10_000);

    let mut group = c.benchmark_group("symbol_search");
    group.throughput(Throughput::Elements(symbols.len() as u64));

    for query in ["", "sym0012", "holdings", "no-such-company"] {
        group.bench_function(format!("filter/{query:?}"), |b| {
            b.iter(|| filter_symbols(black_box(&symbols), black_box(query)).len());
        });
    }

    group.bench_function("filter_then_last_page", |b| {
        b.iter(|| {
            let found = filter_symbols(black_box(&symbols), "company 9");
            let last = total_pages(found.len(), PAGE_SIZE);
            page_slice(&found, last, PAGE_SIZE).len()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
