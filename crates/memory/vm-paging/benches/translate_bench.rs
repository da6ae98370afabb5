//! 地址翻译基准测试

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use vm_paging::{TranslationEngine, PAGE_SIZE};

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");

    group.bench_function("tlb_hit", |b| {
        let mut engine = TranslationEngine::with_capacity(64).unwrap();

        // 预热 TLB
        for i in 0..64u64 {
            engine.translate(i * PAGE_SIZE);
        }

        b.iter(|| {
            for i in 0..64u64 {
                black_box(engine.translate(i * PAGE_SIZE));
            }
        });
    });

    group.bench_function("page_fault", |b| {
        b.iter_batched_ref(
            || TranslationEngine::with_capacity(64).unwrap(),
            |engine| {
                for i in 0..64u64 {
                    black_box(engine.translate(i * PAGE_SIZE));
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_translate);
criterion_main!(benches);
