//! This bench test measures the scheduling-conflict scan against a provider
//! with a heavily booked agenda.

#![allow(missing_docs)]

use chrono::{TimeDelta, Utc};
use clinica::{MemoryStore, Registry, domain::Appointment};
use criterion::{Criterion, criterion_group, criterion_main};

/// Books a long run of back-to-back-ish appointments for the seeded
/// provider. Slots are three hours apart so none of them conflict.
fn preseed_registry() -> Registry<MemoryStore> {
    let mut registry = Registry::open(MemoryStore::new()).unwrap();
    let base = Utc::now() + TimeDelta::hours(24);
    for i in 0..500 {
        registry
            .upsert_appointment(Appointment {
                id: String::new(),
                provider_id: "1".to_string(),
                patient_id: "1".to_string(),
                start: base + TimeDelta::hours(3 * i),
                reason: "Checkup".to_string(),
            })
            .unwrap();
    }
    registry
}

fn check_availability(c: &mut Criterion) {
    let registry = preseed_registry();
    // One probe lands inside a booked slot, the other past the last one;
    // the three-hour gaps are too narrow for a two-hour slot to fit.
    let busy = Utc::now() + TimeDelta::hours(24 + 3 * 250);
    let free = Utc::now() + TimeDelta::hours(24 + 3 * 500);

    c.bench_function("check availability (busy slot)", |b| {
        b.iter(|| registry.check_availability("1", std::hint::black_box(busy), None));
    });
    c.bench_function("check availability (free slot)", |b| {
        b.iter(|| registry.check_availability("1", std::hint::black_box(free), None));
    });
}

criterion_group!(benches, check_availability);
criterion_main!(benches);
