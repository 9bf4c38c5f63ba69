use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deco_engine::algorithms::AlgorithmId;
use deco_engine::{ndl, DriverInput, PlanSettingsBuilder, Stop};

/// Full driver pipeline (profile -> algorithm -> scheduler -> ascent
/// assembler) across a spread of profile depths.
pub fn full_plan_by_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("Full plan by depth");

    for depth in [18.0, 30.0, 45.0, 60.0] {
        group.bench_with_input(BenchmarkId::new("depth", format!("{depth}m")), &depth, |b, &d| {
            let stops = [Stop { depth: d, time: 20 }];
            let settings = PlanSettingsBuilder::new().algorithm(AlgorithmId::Zhl16c).gradient_factors(40, 80).build().unwrap();
            b.iter(|| black_box(deco_engine::run_plan(DriverInput { stops: &stops, settings })));
        });
    }

    group.finish();
}

/// Worst-case iteration depth for the scheduler's inner per-minute loop:
/// a long, deep exposure that produces many stops of non-trivial length.
pub fn worst_case_schedule(c: &mut Criterion) {
    let stops = [Stop { depth: 90.0, time: 5 }];
    let settings = PlanSettingsBuilder::new().algorithm(AlgorithmId::Zhl16c).gradient_factors(30, 70).build().unwrap();
    c.bench_function("300m-class worst case schedule", |b| {
        b.iter(|| black_box(deco_engine::run_plan(DriverInput { stops: &stops, settings })));
    });
}

/// NDL binary search, a separate hot path over the same tissue machinery.
pub fn ndl_search(c: &mut Criterion) {
    use deco_engine::algorithms::buhlmann::{Buhlmann, Variant};
    use deco_engine::GasMix;

    let algo = Buhlmann::new(Variant::Zhl16c, 100, 100);
    c.bench_function("NDL binary search at 30m", |b| {
        b.iter(|| black_box(ndl::solve(&algo, 30.0, GasMix::air())));
    });
}

criterion_group!(benches, full_plan_by_depth, worst_case_schedule, ndl_search);
criterion_main!(benches);
