//! Content hashing utilities

/// Blake3 digest of an article's content, hex encoded.
pub fn content_hash(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}
