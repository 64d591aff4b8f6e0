use sha2::{Digest, Sha256};
use ulid::Ulid;

pub fn intake_id_ulid() -> String {
    format!("i_{}", Ulid::new())
}

pub fn review_session_id_ulid() -> String {
    format!("rv_{}", Ulid::new())
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

pub fn now_rfc3339_utc() -> String {
    // Rfc3339 formatting only fails for years outside 0..=9999.
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
