use criterion::{black_box, criterion_group, criterion_main, Criterion};
use finance_tracker::Ledger;
use std::fs;

const ENTRIES: usize = 1_000;

fn seeded_ledger() -> Ledger {
    let dir = std::env::temp_dir().join(format!("finance-tracker-bench-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let ledger = Ledger::open(dir.join("dados.json")).unwrap();
    for i in 0..ENTRIES {
        let kind = if i % 3 == 0 { "entrada" } else { "saida" };
        ledger
            .add(kind, &format!("entry {}", i), (i + 1) as f64 * 1.25, None)
            .unwrap();
    }
    ledger
}

fn criterion_benchmark(c: &mut Criterion) {
    let ledger = seeded_ledger();

    c.bench_function("ledger_summarize", |b| {
        b.iter(|| black_box(&ledger).summarize())
    });

    c.bench_function("ledger_list", |b| b.iter(|| black_box(&ledger).list()));

    let _ = fs::remove_dir_all(ledger.path().parent().unwrap());
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
