use criterion::{
    black_box,
    criterion_group,
    BenchmarkId,
    Criterion,
};

use archsym::perm::{
    builder::{
        join::Join,
        PermBuilder,
    },
    utils::random_permutation,
    DefaultPermutation,
    Permutation,
};

const RANGE_OF_VALUES: [usize; 7] = [8, 16, 32, 64, 128, 256, 512];

/// How costly is it to instantiate a random permutation.
fn random_instantiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutation__random_creation");
    for i in RANGE_OF_VALUES.iter() {
        group.bench_with_input(BenchmarkId::new("default", i), i, |b, i| {
            b.iter(|| random_permutation::<DefaultPermutation>(*i))
        });
    }
    group.finish();
}

/// Checks the common case of computing (a * b)^-1 vs b^-1 * a^-1.
fn inverse_of_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutation__inv_prod");
    for i in RANGE_OF_VALUES.iter() {
        group.bench_with_input(BenchmarkId::new("inv_of_mult", i), i, |b, i| {
            let first = random_permutation::<DefaultPermutation>(*i);
            let second = random_permutation(*i);
            b.iter(|| black_box(first.multiply(&second).inv()))
        });
        group.bench_with_input(BenchmarkId::new("mult_of_inv", i), i, |b, i| {
            let first = random_permutation::<DefaultPermutation>(*i);
            let second = random_permutation(*i);
            b.iter(|| black_box(second.inv().multiply(&first.inv())))
        });
    }
    group.finish();
}

/// Specialised exponentiation (square-and-multiply) vs a lazily-composed
/// builder join collapsed after the fact.
fn exponentiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutation__exp");
    // permutations of S_2n to the n-th power, to avoid landing on id too often.
    for i in RANGE_OF_VALUES.iter().map(|i| i * 2) {
        group.bench_with_input(BenchmarkId::new("pow", i), &i, |b, i| {
            let perm = random_permutation::<DefaultPermutation>(*i);
            b.iter(|| perm.pow((i / 2) as isize))
        });
        group.bench_with_input(BenchmarkId::new("repeated_join", i), &i, |b, i| {
            let perm = random_permutation::<DefaultPermutation>(*i);
            b.iter(|| {
                let mut joined = perm.clone();
                for _ in 0..i / 2 {
                    joined = Join::new(joined, perm.clone()).collapse();
                }
                joined
            })
        });
    }
    group.finish();
}

fn order_efficiency(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutation__order");
    for i in [8, 16, 32, 64, 100].iter() {
        group.bench_with_input(BenchmarkId::new("default", i), i, |b, i| {
            let perm = random_permutation::<DefaultPermutation>(*i);
            b.iter(|| perm.order())
        });
    }
    group.finish();
}

/// Benchmark the identity check, which should be ~constant.
fn identity_check(c: &mut Criterion) {
    let id = DefaultPermutation::id();
    c.bench_function("permutation__is_id", |b| b.iter(|| id.is_id()));
}

fn inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutation__inverse");
    for i in RANGE_OF_VALUES.iter() {
        group.bench_with_input(BenchmarkId::new("default", i), i, |b, i| {
            let perm = random_permutation::<DefaultPermutation>(*i);
            b.iter(|| perm.inv())
        });
    }
    group.finish();
}

criterion_group!(
    permutation,
    random_instantiation,
    inverse_of_product,
    identity_check,
    inverse,
    exponentiation,
    order_efficiency,
);

criterion::criterion_main!(permutation);
