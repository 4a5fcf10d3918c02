//! Benchmarks for range proof generation and verification

use benches::{generator_sets, max_value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use range::{RangeBounds, RangeProver, RangeVerifier};
use rand::thread_rng;

fn bench_range_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_generation");

    for generators in generator_sets() {
        let bit_length = generators.len();
        group.throughput(Throughput::Elements(bit_length as u64));

        group.bench_with_input(
            BenchmarkId::new("prove", bit_length),
            &generators,
            |b, generators| {
                let mut rng = thread_rng();
                let prover = RangeProver::new(generators).unwrap();
                let value = max_value(bit_length) / 2;

                b.iter(|| {
                    let proof = prover.prove(black_box(value), &mut rng).unwrap();
                    black_box(proof)
                });
            },
        );
    }

    group.finish();
}

fn bench_range_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_verification");

    for generators in generator_sets() {
        let bit_length = generators.len();
        group.throughput(Throughput::Elements(bit_length as u64));

        let mut rng = thread_rng();
        let prover = RangeProver::new(&generators).unwrap();
        let verifier = RangeVerifier::new(&generators).unwrap();
        let (commitment, proof) = prover.prove(max_value(bit_length) / 2, &mut rng).unwrap();

        group.bench_with_input(BenchmarkId::new("verify", bit_length), &bit_length, |b, _| {
            b.iter(|| {
                verifier.verify(black_box(&commitment), black_box(&proof)).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_batch_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_batch_verification");

    let generators = bulletproofs_core::GeneratorSet::new(32);
    let prover = RangeProver::new(&generators).unwrap();
    let verifier = RangeVerifier::new(&generators).unwrap();
    let mut rng = thread_rng();

    for batch_size in [1usize, 4, 16] {
        let items: Vec<_> = (0..batch_size as u64)
            .map(|i| {
                let (commitment, proof) = prover.prove(1500 + i, &mut rng).unwrap();
                (commitment, proof, RangeBounds::full(32))
            })
            .collect();

        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(BenchmarkId::new("verify_batch", batch_size), &items, |b, items| {
            b.iter(|| black_box(verifier.verify_batch(black_box(items))));
        });
    }

    group.finish();
}

fn bench_range_proof_size(c: &mut Criterion) {
    let group = c.benchmark_group("range_proof_size");

    let mut rng = thread_rng();
    for generators in generator_sets() {
        let bit_length = generators.len();
        let prover = RangeProver::new(&generators).unwrap();
        let (_, proof) = prover.prove(max_value(bit_length), &mut rng).unwrap();

        println!(
            "Range proof size for {} bits: {} bytes, {} JSON bytes",
            bit_length,
            proof.size_bytes(),
            proof.to_json().unwrap().len()
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_range_proof_generation,
    bench_range_proof_verification,
    bench_batch_verification,
    bench_range_proof_size
);
criterion_main!(benches);
