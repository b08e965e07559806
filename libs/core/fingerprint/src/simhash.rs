//! 64-bit SimHash over a token stream.
//!
//! For each token, its MD5 digest is interpreted as a 128-bit integer
//! and the low 64 bits are used as a bit-voting source: bit `i` of
//! that slice casts a vote of +1 (set) or -1 (unset) into accumulator
//! `v[i]`. The final fingerprint bit `i` is 1 iff `v[i] > 0`. Formatted
//! as 16 lowercase hex characters, zero-padded.

/// Width, in hex characters, of a formatted SimHash fingerprint.
pub const SIMHASH_HEX_WIDTH: usize = 16;

const SIMHASH_BITS: usize = 64;

/// Computes the 64-bit SimHash fingerprint of `tokens`, formatted as
/// 16 lowercase hex characters. An empty token stream yields
/// `"0000000000000000"`.
pub fn simhash_hex<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut votes = [0i64; SIMHASH_BITS];
    let mut saw_any = false;

    for token in tokens {
        saw_any = true;
        let digest = md5::compute(token.as_ref().as_bytes());
        let low_64 = low_64_bits(&digest.0);
        for (bit_index, vote) in votes.iter_mut().enumerate() {
            if (low_64 >> bit_index) & 1 == 1 {
                *vote += 1;
            } else {
                *vote -= 1;
            }
        }
    }

    if !saw_any {
        return "0".repeat(SIMHASH_HEX_WIDTH);
    }

    let mut fingerprint: u64 = 0;
    for (bit_index, vote) in votes.iter().enumerate() {
        if *vote > 0 {
            fingerprint |= 1u64 << bit_index;
        }
    }

    format!("{:0width$x}", fingerprint, width = SIMHASH_HEX_WIDTH)
}

/// Interprets the trailing 8 bytes of a 16-byte MD5 digest as a
/// big-endian `u64` — the low 64 bits of the digest read as one
/// 128-bit integer, matching bytes 8..16 in their natural (most-
/// significant-byte-first) order.
fn low_64_bits(digest: &[u8; 16]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&digest[8..16]);
    u64::from_be_bytes(buf)
}

/// Hamming distance between two equal-length hex fingerprints, computed
/// over their binary expansion. Panics if the strings differ in length
/// or contain non-hex characters — callers are expected to pass two
/// well-formed `simhash_hex` outputs.
pub fn hamming_distance(a: &str, b: &str) -> u32 {
    assert_eq!(a.len(), b.len(), "hamming_distance requires equal-length hex strings");
    let a_val = u64::from_str_radix(a, 16).expect("invalid hex fingerprint");
    let b_val = u64::from_str_radix(b, 16).expect("invalid hex fingerprint");
    (a_val ^ b_val).count_ones()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream_is_all_zero() {
        let empty: Vec<&str> = vec![];
        assert_eq!(simhash_hex(empty), "0000000000000000");
    }

    #[test]
    fn is_16_lowercase_hex_chars() {
        let fp = simhash_hex(["fed", "raises", "rates"]);
        assert_eq!(fp.len(), 16);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn deterministic() {
        let tokens = ["fed", "raises", "rates", "0", "25"];
        assert_eq!(simhash_hex(tokens), simhash_hex(tokens));
    }

    #[test]
    fn near_duplicate_tokens_have_low_hamming_distance() {
        let a = simhash_hex(["fed", "raises", "rates", "0", "25", "percent"]);
        let b = simhash_hex(["fed", "raises", "rates", "0", "25", "percentage"]);
        assert!(hamming_distance(&a, &b) < 32);
    }

    #[test]
    fn hamming_distance_zero_for_identical() {
        let fp = simhash_hex(["apple", "stock", "rises"]);
        assert_eq!(hamming_distance(&fp, &fp), 0);
    }
}
