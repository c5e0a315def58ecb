use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::Rng;

const SUFFIX_LEN: usize = 8;

/// Generate an identifier of the form `<prefix>_<millis in hex>_<random>`.
///
/// Unique within a process with overwhelming probability; not meant to be
/// unguessable.
pub fn generate_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{}_{:x}_{}", prefix, millis, suffix)
}

pub fn block_id() -> String {
    generate_id("blk")
}

pub fn store_id() -> String {
    generate_id("store")
}
