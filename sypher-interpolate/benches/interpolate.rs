use bls::Scalar;
use criterion::{criterion_group, criterion_main, Criterion};
use ff::Field;
use rand_core::OsRng;
use sypher_interpolate::Polynomial;

fn bench_interpolate(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");

    let n = 20_usize;
    let mut rng = OsRng;
    let domain = (1..=n as u64).map(Scalar::from).collect::<Vec<Scalar>>();
    let random_scalars_y = (0..n)
        .map(|_| Scalar::random(&mut rng))
        .collect::<Vec<Scalar>>();

    group.bench_function("lagrange", |b| {
        b.iter(|| Polynomial::interpolate(&domain, &random_scalars_y).unwrap())
    });

    let poly = Polynomial::interpolate(&domain, &random_scalars_y).unwrap();
    let vanishing = Polynomial::vanishing(&domain);
    let product = &poly * &vanishing;

    group.bench_function("divide-by-vanishing", |b| {
        b.iter(|| product.div_rem(&vanishing).unwrap())
    });
}

criterion_group!(benches, bench_interpolate);
criterion_main!(benches);
