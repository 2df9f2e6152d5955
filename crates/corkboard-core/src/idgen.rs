//! SHA256 + base36 ID generation.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Base36 alphabet (0-9, a-z).
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Fixed length of the hash suffix in generated IDs.
pub const ID_LENGTH: usize = 6;

/// ID prefix constants for each record kind.
pub mod prefix {
    /// Boards (bo-xxxxxx).
    pub const BOARD: &str = "bo";
    /// Columns (co-xxxxxx).
    pub const COLUMN: &str = "co";
    /// Items (it-xxxxxx).
    pub const ITEM: &str = "it";
}

/// Converts a u64 to a base36 string of the specified length.
///
/// Pads with leading zeros; when the encoding is longer than `length`, the
/// least significant digits are kept.
pub fn encode_base36(value: u64, length: usize) -> String {
    let mut num = value;
    let mut chars: Vec<u8> = Vec::with_capacity(length);
    while num > 0 {
        chars.push(BASE36_ALPHABET[(num % 36) as usize]);
        num /= 36;
    }
    chars.reverse();

    let mut s = String::from_utf8(chars).expect("base36 chars are valid UTF-8");

    if s.len() < length {
        let padding = "0".repeat(length - s.len());
        s = padding + &s;
    }
    if s.len() > length {
        s = s[s.len() - length..].to_owned();
    }

    s
}

/// Creates a hash-based ID of the form `<prefix>-<base36>`.
///
/// The hash input combines the record's seed text (title or name), its
/// creator, the creation timestamp, and a nonce. Callers retry with
/// increasing nonces when the generated ID collides with an existing row.
pub fn generate_id(
    prefix: &str,
    seed: &str,
    creator: &str,
    timestamp: DateTime<Utc>,
    nonce: u32,
) -> String {
    let content = format!(
        "{}|{}|{}|{}",
        seed,
        creator,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        nonce
    );

    let hash = Sha256::digest(content.as_bytes());

    // The first 8 bytes carry far more entropy than 6 base36 digits encode.
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[..8]);
    let value = u64::from_be_bytes(bytes);

    format!("{}-{}", prefix, encode_base36(value, ID_LENGTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_base36_zero_pads() {
        assert_eq!(encode_base36(0, 4), "0000");
        assert_eq!(encode_base36(35, 4), "000z");
        assert_eq!(encode_base36(36, 4), "0010");
    }

    #[test]
    fn encode_base36_truncates_to_length() {
        let result = encode_base36(u64::MAX, 3);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn generate_id_format() {
        let ts = Utc::now();
        let id = generate_id(prefix::ITEM, "Test title", "alice", ts, 0);
        assert!(id.starts_with("it-"));
        // "it-" + 6 chars = 9 total
        assert_eq!(id.len(), 9);
    }

    #[test]
    fn generate_id_deterministic() {
        let ts = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let id1 = generate_id(prefix::BOARD, "Board", "alice", ts, 0);
        let id2 = generate_id(prefix::BOARD, "Board", "alice", ts, 0);
        assert_eq!(id1, id2);
    }

    #[test]
    fn generate_id_nonce_changes_output() {
        let ts = Utc::now();
        let id1 = generate_id(prefix::ITEM, "Title", "alice", ts, 0);
        let id2 = generate_id(prefix::ITEM, "Title", "alice", ts, 1);
        assert_ne!(id1, id2);
    }
}
