//! Payload builders for the wide-column performance table.

use fake::faker::lorem::en::Words;
use fake::Fake;
use rand::Rng;
use serde_json::json;

use crate::sampler::pick_from;

const CATEGORIES: [&str; 5] = ["A", "B", "C", "D", "E"];
const SOURCES: [&str; 3] = ["web", "mobile", "api"];

/// Nested JSON document stored in `performance_test.json_data`.
pub fn json_payload<R: Rng + ?Sized>(rng: &mut R, record_number: u64) -> serde_json::Value {
    let category = *pick_from(rng, &CATEGORIES);
    let tags: Vec<String> = Words(1..6).fake_with_rng(rng);
    let source = *pick_from(rng, &SOURCES);
    let priority = rng.gen_range(1..=10);
    let processed = rng.gen_bool(0.5);

    json!({
        "id": record_number,
        "category": category,
        "tags": tags,
        "metadata": {
            "source": source,
            "priority": priority,
            "processed": processed,
        }
    })
}

/// Between 10 and 100 random bytes.
pub fn blob_payload<R: Rng + ?Sized>(rng: &mut R) -> Vec<u8> {
    let len = rng.gen_range(10..=100);
    (0..len).map(|_| rng.gen::<u8>()).collect()
}
