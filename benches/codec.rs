use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use standardized_hand_history::codec::{decode, encode, Decoder};
use standardized_hand_history::hand_history::{sample_cash_hand, sample_tournament_hand};
use standardized_hand_history::validation::validate;

fn samples() -> Vec<(&'static str, standardized_hand_history::hand_history::HandHistory)> {
    vec![
        ("cash", sample_cash_hand()),
        ("tournament", sample_tournament_hand()),
    ]
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for (name, hand) in samples() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &hand, |b, hand| {
            b.iter(|| encode(hand).unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let lenient = Decoder::lenient();
    for (name, hand) in samples() {
        let bytes = encode(&hand).unwrap();
        group.bench_with_input(BenchmarkId::new("strict", name), &bytes, |b, bytes| {
            b.iter(|| decode(bytes).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("lenient", name), &bytes, |b, bytes| {
            b.iter(|| lenient.decode_slice(bytes).unwrap())
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    for (name, hand) in samples() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &hand, |b, hand| {
            b.iter(|| validate(hand))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_validate);
criterion_main!(benches);
