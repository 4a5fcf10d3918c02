//! Benchmarks for inner product argument

use benches::{generator_sets, random_scalars};
use bulletproofs_core::ProofTranscript;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ipa::{inner_product_commitment, InnerProductProver, InnerProductVerifier};
use rand::thread_rng;

const DOMAIN: &[u8] = b"ipa_benchmark";

fn bench_ipa_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("ipa_generation");

    for generators in generator_sets() {
        let vector_length = generators.len();
        group.throughput(Throughput::Elements(vector_length as u64));

        let mut rng = thread_rng();
        let a = random_scalars(&mut rng, vector_length);
        let b = random_scalars(&mut rng, vector_length);

        group.bench_with_input(
            BenchmarkId::new("prove", vector_length),
            &generators,
            |bencher, generators| {
                bencher.iter(|| {
                    let prover = InnerProductProver::new(
                        generators.g_vec().to_vec(),
                        generators.h_vec().to_vec(),
                        generators.h(),
                    )
                    .unwrap();
                    let mut transcript = ProofTranscript::new(DOMAIN);
                    let proof = prover.prove(&mut transcript, black_box(a.clone()), black_box(b.clone())).unwrap();
                    black_box(proof)
                });
            },
        );
    }

    group.finish();
}

fn bench_ipa_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("ipa_verification");

    for generators in generator_sets() {
        let vector_length = generators.len();
        group.throughput(Throughput::Elements(vector_length as u64));

        let mut rng = thread_rng();
        let a = random_scalars(&mut rng, vector_length);
        let b = random_scalars(&mut rng, vector_length);
        let p = inner_product_commitment(generators.g_vec(), generators.h_vec(), &generators.h(), &a, &b).unwrap();

        let prover = InnerProductProver::new(generators.g_vec().to_vec(), generators.h_vec().to_vec(), generators.h())
            .unwrap();
        let proof = prover.prove(&mut ProofTranscript::new(DOMAIN), a, b).unwrap();
        let verifier =
            InnerProductVerifier::new(generators.g_vec().to_vec(), generators.h_vec().to_vec(), generators.h())
                .unwrap();

        group.bench_with_input(BenchmarkId::new("verify", vector_length), &vector_length, |bencher, _| {
            bencher.iter(|| {
                let mut transcript = ProofTranscript::new(DOMAIN);
                verifier.verify(&mut transcript, black_box(&proof), black_box(&p)).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_ipa_proof_size(c: &mut Criterion) {
    let group = c.benchmark_group("ipa_proof_size");

    let mut rng = thread_rng();
    for generators in generator_sets() {
        let vector_length = generators.len();
        let prover = InnerProductProver::new(generators.g_vec().to_vec(), generators.h_vec().to_vec(), generators.h())
            .unwrap();
        let a = random_scalars(&mut rng, vector_length);
        let b = random_scalars(&mut rng, vector_length);
        let proof = prover.prove(&mut ProofTranscript::new(DOMAIN), a, b).unwrap();

        println!("IPA proof size for vector length {}: {} bytes", vector_length, proof.size_bytes());
    }

    group.finish();
}

criterion_group!(benches, bench_ipa_generation, bench_ipa_verification, bench_ipa_proof_size);
criterion_main!(benches);
