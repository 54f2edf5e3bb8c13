//! Small dependency-free helpers shared across the domain.

use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a UUID-v4-shaped request id (without external dependency)
pub fn request_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    // Mix in the process id so concurrent processes do not collide on the
    // same clock reading.
    let seed = nanos ^ ((std::process::id() as u128) << 64);
    format!(
        "{:08x}-{:04x}-4{:03x}-{:04x}-{:012x}",
        (seed >> 96) as u32,
        (seed >> 80) as u16,
        (seed >> 64) as u16 & 0x0fff,
        ((seed >> 48) as u16 & 0x3fff) | 0x8000,
        (seed & 0xffff_ffff_ffff) as u64
    )
}

/// Get current timestamp in milliseconds
pub fn timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
