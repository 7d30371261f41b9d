//! # TronKit Benchmarks
//!
//! | Component | Operation |
//! |-----------|-----------|
//! | tk-02 Address Codec | base58check decode |
//! | tk-03 Signing Engine | sign, recover, batch verify |
//! | tk-04 ABI Coder | schema-driven call encoding |
//! | tk-05 Typed Data | struct hashing, warm and cold cache |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use serde_json::json;
use std::time::Duration;
use tk_02_address_codec::Address;
use tk_03_signing_engine::{recover_address, sign, verify_batch, VerificationRequest};
use tk_04_abi_coder::{AbiCoderApi, AbiCoderService, AbiFunction, AbiParam};
use tk_05_typed_data::{TypedDataEncoder, TypedDataField, TypedDataTypes};

const PRIVATE_KEY: [u8; 32] = [
    0xda, 0x14, 0x63, 0x74, 0xa7, 0x53, 0x10, 0xb9, 0x66, 0x6e, 0x83, 0x4e, 0xe4, 0xad, 0x08, 0x66,
    0xd6, 0xf4, 0x03, 0x59, 0x67, 0xbf, 0xc7, 0x62, 0x17, 0xc5, 0xa4, 0x95, 0xff, 0xf9, 0xf0, 0xd0,
];
const BASE58: &str = "TPL66VK2gCXNCD7EJg9pgJRfqcRazjhUZY";

// ============================================================================
// TK-02: Address Codec
// ============================================================================

fn bench_address_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("tk-02-address-codec");

    group.bench_function("parse_base58", |b| {
        b.iter(|| black_box(Address::parse(black_box(BASE58)).is_ok()))
    });

    group.finish();
}

// ============================================================================
// TK-03: Signing Engine
// ============================================================================

fn bench_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("tk-03-signing-engine");
    group.measurement_time(Duration::from_secs(10));

    let digest: [u8; 32] = rand::thread_rng().gen();
    let signature = match sign(&digest, &PRIVATE_KEY) {
        Ok(signature) => signature,
        Err(e) => panic!("benchmark key rejected: {e}"),
    };

    group.bench_function("sign_digest", |b| {
        b.iter(|| black_box(sign(black_box(&digest), &PRIVATE_KEY).is_ok()))
    });
    group.bench_function("recover_address", |b| {
        b.iter(|| black_box(recover_address(black_box(&digest), &signature).is_ok()))
    });

    for size in [10usize, 100, 500] {
        let requests: Vec<VerificationRequest> = (0..size)
            .filter_map(|_| {
                let message_hash: [u8; 32] = rand::thread_rng().gen();
                sign(&message_hash, &PRIVATE_KEY)
                    .ok()
                    .map(|signature| VerificationRequest {
                        message_hash,
                        signature,
                        expected_signer: None,
                    })
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("verify_batch", size), &requests, |b, reqs| {
            b.iter(|| black_box(verify_batch(reqs).all_valid))
        });
    }

    group.finish();
}

// ============================================================================
// TK-04: ABI Coder
// ============================================================================

fn bench_abi(c: &mut Criterion) {
    let mut group = c.benchmark_group("tk-04-abi-coder");
    let service: AbiCoderService = AbiCoderService::default();

    let function = AbiFunction::new("batchTransfer").with_inputs(vec![
        AbiParam::new("recipients", "address[]"),
        AbiParam::new("amounts", "uint256[]"),
    ]);
    let args = [json!(vec![BASE58; 32]), json!(vec![1_000_000u64; 32])];

    group.bench_function("encode_call_32_recipients", |b| {
        b.iter(|| black_box(service.encode_call(&function, black_box(&args)).is_ok()))
    });

    group.finish();
}

// ============================================================================
// TK-05: Typed Data
// ============================================================================

fn mail_types() -> TypedDataTypes {
    let mut types = TypedDataTypes::new();
    types.insert(
        "Person".into(),
        vec![
            TypedDataField::new("name", "string"),
            TypedDataField::new("wallet", "address"),
        ],
    );
    types.insert(
        "Mail".into(),
        vec![
            TypedDataField::new("from", "Person"),
            TypedDataField::new("to", "Person[]"),
            TypedDataField::new("contents", "string"),
        ],
    );
    types
}

fn bench_typed_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("tk-05-typed-data");

    let person = json!({"name": "Cow", "wallet": BASE58});
    let mail = json!({"from": person.clone(), "to": vec![person; 16], "contents": "Hello"});

    let warm = match TypedDataEncoder::new(mail_types()) {
        Ok(encoder) => encoder,
        Err(e) => panic!("benchmark schema rejected: {e}"),
    };
    group.bench_function("hash_warm_cache", |b| {
        b.iter(|| black_box(warm.hash(black_box(&mail)).is_ok()))
    });
    group.bench_function("build_and_hash", |b| {
        b.iter(|| {
            let encoder = TypedDataEncoder::new(mail_types());
            black_box(encoder.map(|e| e.hash(&mail).is_ok()))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_address_codec,
    bench_signing,
    bench_abi,
    bench_typed_data
);
criterion_main!(benches);
