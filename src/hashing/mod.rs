//! BLAKE3 fingerprints for model artifacts.

use std::io;
use std::path::Path;

/// Full 32-byte BLAKE3 digest of `data`.
#[inline]
pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// Short hex fingerprint (first 8 bytes of the BLAKE3 digest).
///
/// Only used for logging and for telling two loaded models apart; it is not a
/// content-addressing key.
#[inline]
pub fn short_fingerprint(data: &[u8]) -> String {
    let hash = blake3::hash(data);
    hash.to_hex()[..16].to_string()
}

/// Reads a file and returns its [`short_fingerprint`].
pub fn fingerprint_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(short_fingerprint(&bytes))
}
