use exact_ratio::{as_integer_ratio, convergents, BigUint};

fn test_pi() {
    black_box(as_integer_ratio(std::f64::consts::PI).unwrap());
}

fn test_tenth() {
    black_box(as_integer_ratio(0.1).unwrap());
}

fn test_extremes() {
    black_box(as_integer_ratio(f64::MAX).unwrap());
    black_box(as_integer_ratio(f64::from_bits(1)).unwrap());
    black_box(as_integer_ratio(f64::from_bits(0x000f_ffff_ffff_ffff)).unwrap());
}

fn test_convergents() {
    for r in convergents(std::f64::consts::E).unwrap() {
        black_box(r);
    }
}

fn test_round_trip() {
    let v = black_box(1.0 / 3.0);
    black_box(as_integer_ratio(v).unwrap().as_f64());
}

fn test_bigint_div() {
    let a = BigUint::pseudorandom(20, 12345);
    let b = BigUint::pseudorandom(10, 67890);
    black_box(a / b);
}

fn test_bigint_as_dec() {
    let a = BigUint::pseudorandom(18, 197123);
    black_box(a.as_decimal());
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("test_pi", |b| b.iter(test_pi));
    c.bench_function("test_tenth", |b| b.iter(test_tenth));
    c.bench_function("test_extremes", |b| b.iter(test_extremes));
    c.bench_function("test_convergents", |b| b.iter(test_convergents));
    c.bench_function("test_round_trip", |b| b.iter(test_round_trip));
    c.bench_function("test_bigint_div", |b| b.iter(test_bigint_div));
    c.bench_function("test_bigint_as_dec", |b| b.iter(test_bigint_as_dec));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
