use criterion::{
    criterion_group,
    BenchmarkId,
    Criterion,
};

const RANGE_OF_VALUES: [usize; 5] = [8, 10, 16, 20, 32];

use archsym::{
    group::{
        stabchain::{
            base::selectors::{
                LmpSelector,
                SmpSelector,
            },
            builder::{
                ift::StabchainBuilderIft,
                random::{
                    random_ift::StabchainBuilderRandom,
                    RandomAlgoParameters,
                },
                Builder,
            },
        },
        Group,
        PermGroup,
    },
    perm::actions::SimpleApplication,
};

/// Benchmarks a specific stabiliser-chain construction strategy over a
/// family of groups of growing degree.
macro_rules! bench_stabchain_strategy {
    ($bencher:ident, $name:expr, $i:ident, $family:expr) => {
        $bencher.bench_with_input(BenchmarkId::new(concat!($name, "_ift"), $i), $i, |b, i| {
            let g = $family(*i);
            b.iter(|| {
                let mut builder = StabchainBuilderIft::new(LmpSelector, SimpleApplication::default());
                builder.set_generators(&g);
                builder.build()
            })
        });
        $bencher.bench_with_input(BenchmarkId::new(concat!($name, "_random"), $i), $i, |b, i| {
            let g = $family(*i);
            b.iter(|| {
                let mut builder =
                    StabchainBuilderRandom::new(SmpSelector, SimpleApplication::default(), RandomAlgoParameters::new());
                builder.set_generators(&g);
                builder.build()
            })
        });
    };
}

fn stabchain_cyclic(c: &mut Criterion) {
    let mut group = c.benchmark_group("group__stabchain__cyclic");
    for i in RANGE_OF_VALUES.iter() {
        group.bench_with_input(BenchmarkId::new("default", i), i, |b, i| {
            let g = Group::cyclic(*i);
            b.iter(|| g.stabchain())
        });
        bench_stabchain_strategy!(group, "cyclic", i, Group::cyclic);
    }
    group.finish();
}

fn stabchain_symmetric(c: &mut Criterion) {
    let mut group = c.benchmark_group("group__stabchain__symmetric");
    for i in RANGE_OF_VALUES.iter() {
        group.bench_with_input(BenchmarkId::new("default", i), i, |b, i| {
            let g = Group::symmetric(*i);
            b.iter(|| g.stabchain())
        });
        bench_stabchain_strategy!(group, "symmetric", i, Group::symmetric);
    }
    group.finish();
}

fn stabchain_dihedral(c: &mut Criterion) {
    let mut group = c.benchmark_group("group__stabchain__dihedral");
    for i in RANGE_OF_VALUES.iter() {
        group.bench_with_input(BenchmarkId::new("default", i), i, |b, i| {
            let g = Group::dihedral(*i);
            b.iter(|| g.stabchain())
        });
        bench_stabchain_strategy!(group, "dihedral", i, Group::dihedral);
    }
    group.finish();
}

/// A direct product of two symmetric groups, exercised through [`PermGroup`]
/// rather than the bare stabiliser-chain builders, since that's where
/// direct-product composition lives.
fn stabchain_direct_product_symmetric(c: &mut Criterion) {
    let mut group = c.benchmark_group("group__stabchain__product_symmetric");
    group.sample_size(20);
    for i in RANGE_OF_VALUES.iter() {
        group.bench_with_input(BenchmarkId::new("default", i), i, |b, i| {
            b.iter(|| {
                let left = PermGroup::symmetric(*i);
                let right = PermGroup::symmetric(*i);
                left.direct_product(&right).order()
            })
        });
    }
    group.finish();
}

criterion_group!(
    stabchain,
    stabchain_cyclic,
    stabchain_symmetric,
    stabchain_dihedral,
    stabchain_direct_product_symmetric,
);

criterion::criterion_main!(stabchain);
