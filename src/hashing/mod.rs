//! BLAKE3 helpers for sentence-level keys.
//!
//! [`hash_sentence`] keys the embedding memo cache; [`hash_to_u64`] seeds the stub
//! embedder so identical sentences always produce identical vectors.

#[inline]
pub fn hash_sentence(sentence: &str) -> [u8; 32] {
    *blake3::hash(sentence.as_bytes()).as_bytes()
}

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Only used as a deterministic seed; collisions make two sentences share a stub vector,
/// never corrupt a cache entry (the cache uses the full [`hash_sentence`] key).
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hash_sentence_determinism() {
        let sentence = "The sky is blue.";

        let hash1 = hash_sentence(sentence);
        let hash2 = hash_sentence(sentence);

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_sentence_uniqueness() {
        let sentences = [
            "The sky is blue.",
            "The sky is blue",
            "the sky is blue.",
            "The sky is blue. ",
            "Der Himmel ist blau.",
        ];

        let hashes: HashSet<_> = sentences.iter().map(|s| hash_sentence(s)).collect();

        assert_eq!(hashes.len(), sentences.len());
    }

    #[test]
    fn test_hash_sentence_empty_string() {
        let hash = hash_sentence("");
        assert!(!hash.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_hash_to_u64_matches_sentence_hash_prefix() {
        let data = "Heute ist das Wetter sehr schön.";
        let full = hash_sentence(data);
        let short = hash_to_u64(data.as_bytes());

        assert_eq!(short.to_le_bytes(), full[..8]);
    }

    #[test]
    fn test_hash_to_u64_uniqueness() {
        let inputs = [b"one".as_slice(), b"two".as_slice(), b"One".as_slice()];

        let hashes: HashSet<_> = inputs.iter().map(|i| hash_to_u64(i)).collect();

        assert_eq!(hashes.len(), inputs.len());
    }
}
