//! Encrypted-counter benchmarks.
//!
//! Run with: cargo bench

use criterion::{criterion_group, criterion_main, Criterion};
use num_bigint_dig::BigUint;
use tally_crypto::{Counter, PaillierKeyPair};

const P_HEX: &str = "EB2BEF5773197A6FFAD901436F0E29E9A924BA7B532AADB46436466BC5B83347";
const Q_HEX: &str = "D3517CEEDB7D4F7207533709C23D8A520961361D990C7D789E2C81B8C3D626D3";

fn fixture() -> PaillierKeyPair {
    tally_crypto::init().unwrap();
    let p = BigUint::parse_bytes(P_HEX.as_bytes(), 16).unwrap();
    let q = BigUint::parse_bytes(Q_HEX.as_bytes(), 16).unwrap();
    PaillierKeyPair::from_primes(&p, &q).unwrap()
}

fn bench_counter_ops(c: &mut Criterion) {
    let pair = fixture();
    let mut group = c.benchmark_group("counter");

    group.bench_function("new", |b| {
        b.iter(|| Counter::new(pair.public()).unwrap());
    });

    group.bench_function("inc_by_1", |b| {
        let mut counter = Counter::new(pair.public()).unwrap();
        b.iter(|| counter.inc(pair.public(), 1).unwrap());
    });

    group.bench_function("inc_by_1000", |b| {
        let mut counter = Counter::new(pair.public()).unwrap();
        b.iter(|| counter.inc(pair.public(), 1000).unwrap());
    });

    group.bench_function("add", |b| {
        let mut a = Counter::new(pair.public()).unwrap();
        let other = Counter::new(pair.public()).unwrap();
        b.iter(|| a.add(pair.public(), &other).unwrap());
    });

    group.bench_function("touch", |b| {
        let mut counter = Counter::new(pair.public()).unwrap();
        b.iter(|| counter.touch(pair.public()).unwrap());
    });

    group.bench_function("decrypt", |b| {
        let mut counter = Counter::new(pair.public()).unwrap();
        counter.inc(pair.public(), 123_456).unwrap();
        b.iter(|| pair.private().decrypt(&counter).unwrap());
    });

    group.bench_function("private_cmp2", |b| {
        let mut x = Counter::new(pair.public()).unwrap();
        x.inc(pair.public(), 1_000_000).unwrap();
        let mut y = Counter::new(pair.public()).unwrap();
        y.inc(pair.public(), 999_999).unwrap();
        b.iter(|| x.private_cmp2(&y, pair.public(), pair.private()).unwrap());
    });

    group.finish();
}

fn bench_keygen(c: &mut Criterion) {
    tally_crypto::init().unwrap();
    let mut group = c.benchmark_group("keygen");
    group.sample_size(10);

    group.bench_function("generate_512", |b| {
        b.iter(|| PaillierKeyPair::generate(512).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_counter_ops, bench_keygen);
criterion_main!(benches);
