extern crate criterion;
extern crate modelspace;

use std::env;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use modelspace::half::Half;
use modelspace::recoupling::SixJ;
use modelspace::{Conf, ModelSpace, ModelSpaceBuilder};

fn nmax() -> i32 {
    env::var("MS_NMAX").map(|s| s.parse().unwrap()).unwrap_or(4)
}

fn model_space(nmax: i32) -> ModelSpace {
    ModelSpaceBuilder::oscillator(
        Conf::with_nmax(nmax),
        &["p0s1", "n0s1", "p0p3", "n0p3", "p0p1", "n0p1"],
        &[],
    )
    .unwrap()
    .build()
    .unwrap()
}

fn bench_build(c: &mut Criterion) {
    let nmax = nmax();
    c.bench_function("build", |b| b.iter(|| model_space(black_box(nmax))));
}

fn bench_three_body(c: &mut Criterion) {
    let mut ms = model_space(2);
    c.bench_function("setup_three_body_channels", |b| {
        b.iter(|| ms.setup_three_body_channels())
    });
}

fn bench_precalculate_moshinsky(c: &mut Criterion) {
    let ms = model_space(1);
    c.bench_function("precalculate_moshinsky", |b| {
        b.iter(|| {
            ms.recoupling().clear();
            ms.recoupling().precalculate_moshinsky(black_box(4))
        })
    });
}

fn bench_cached_six_j(c: &mut Criterion) {
    let ms = model_space(1);
    c.bench_function("cached_six_j", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for tj in 0 .. 8 {
                sum += ms.six_j(SixJ {
                    j1: Half(tj), j2: Half(tj), j3: Half(2),
                    j4: Half(3), j5: Half(3), j6: Half(tj),
                });
            }
            sum
        })
    });
}

criterion_group!(benches, bench_build, bench_three_body,
                 bench_precalculate_moshinsky, bench_cached_six_j);
criterion_main!(benches);
