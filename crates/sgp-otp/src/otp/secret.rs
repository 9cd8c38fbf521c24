//! Base-32 shared-secret handling (RFC 4648 alphabet `A–Z2–7`).
//!
//! The decoder is implemented directly rather than through a codec crate:
//! authenticator secrets are entered by humans, so decoding must be
//! case-insensitive, tolerate optional trailing `=` padding, silently drop
//! the trailing bits that do not fill a whole byte, and report *which*
//! failure occurred through the crate's typed error kinds.

use crate::otp::types::{OtpError, OtpErrorKind};

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Decoding
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Decode a base-32 secret into raw key bytes.
///
/// Trailing `=` padding is stripped and the input is treated
/// case-insensitively. A base-32 string's bit length is generally not a
/// multiple of 8; leftover bits that do not complete a byte are discarded.
pub fn decode_base32(secret: &str) -> Result<Vec<u8>, OtpError> {
    let stripped = secret.trim_end_matches('=');
    if stripped.is_empty() {
        return Err(OtpError::new(
            OtpErrorKind::EmptySecret,
            "Secret is empty after padding strip",
        ));
    }

    let mut out = Vec::with_capacity(stripped.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for ch in stripped.chars() {
        let value = alphabet_value(ch).ok_or_else(|| {
            OtpError::new(
                OtpErrorKind::InvalidSecretEncoding,
                "Secret contains a character outside the base-32 alphabet",
            )
            .with_detail(format!("character {:?}", ch))
        })?;
        buffer = (buffer << 5) | u32::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
    }

    if out.is_empty() {
        // Fewer than 8 bits of input: no decodable key material.
        return Err(OtpError::new(
            OtpErrorKind::EmptySecret,
            "Secret decodes to zero bytes",
        ));
    }
    Ok(out)
}

/// Map one character to its 5-bit value, case-insensitively.
fn alphabet_value(ch: char) -> Option<u8> {
    match ch.to_ascii_uppercase() {
        c @ 'A'..='Z' => Some(c as u8 - b'A'),
        c @ '2'..='7' => Some(c as u8 - b'2' + 26),
        _ => None,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Encoding & secret generation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Encode raw bytes to base-32 (no padding, uppercase).
pub fn encode_base32(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(5) * 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

/// Generate a cryptographically-random base-32 secret.
pub fn generate_secret(byte_length: usize) -> String {
    use rand::RngCore;
    let mut buf = vec![0u8; byte_length];
    rand::thread_rng().fill_bytes(&mut buf);
    encode_base32(&buf)
}

/// Check if a string decodes as a base-32 secret.
pub fn is_valid_base32(s: &str) -> bool {
    decode_base32(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Decoding ─────────────────────────────────────────────────

    #[test]
    fn decode_rfc6238_secret() {
        // "GEZDGNBVGY3TQOJQ" is ASCII "1234567890" in base-32.
        let key = decode_base32("GEZDGNBVGY3TQOJQ").unwrap();
        assert_eq!(key, b"1234567890");
    }

    #[test]
    fn decode_case_insensitive() {
        let upper = decode_base32("GEZDGNBVGY3TQOJQ").unwrap();
        let lower = decode_base32("gezdgnbvgy3tqojq").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn decode_padding_tolerant() {
        let bare = decode_base32("GEZDGNBVGY3TQOJQ").unwrap();
        let padded = decode_base32("GEZDGNBVGY3TQOJQ========").unwrap();
        assert_eq!(bare, padded);
    }

    #[test]
    fn decode_discards_trailing_bits() {
        // "JBSWY3DP" = "Hello": 40 bits, exactly 5 bytes.
        assert_eq!(decode_base32("JBSWY3DP").unwrap(), b"Hello");
        // "JBSWY3D" = 35 bits: 4 complete bytes, 3 bits dropped.
        assert_eq!(decode_base32("JBSWY3D").unwrap(), b"Hell");
    }

    #[test]
    fn decode_rejects_invalid_characters() {
        // '1' and '0' are not in the base-32 alphabet.
        let err = decode_base32("12345").unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::InvalidSecretEncoding);
        let err = decode_base32("ABC DEF").unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::InvalidSecretEncoding);
    }

    #[test]
    fn decode_rejects_empty() {
        let err = decode_base32("").unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::EmptySecret);
        let err = decode_base32("====").unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::EmptySecret);
    }

    #[test]
    fn decode_rejects_sub_byte_input() {
        // A single character is only 5 bits — no complete byte.
        let err = decode_base32("A").unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::EmptySecret);
    }

    // ── Encoding ─────────────────────────────────────────────────

    #[test]
    fn encode_known_value() {
        assert_eq!(encode_base32(b"Hello"), "JBSWY3DP");
        assert_eq!(encode_base32(b"1234567890"), "GEZDGNBVGY3TQOJQ");
    }

    #[test]
    fn encode_decode_roundtrip() {
        let original = b"hello world secret";
        let b32 = encode_base32(original);
        let decoded = decode_base32(&b32).unwrap();
        assert_eq!(decoded, original);
    }

    // ── Secret generation ────────────────────────────────────────

    #[test]
    fn generated_secret_decodes_to_requested_length() {
        let s = generate_secret(20);
        let bytes = decode_base32(&s).unwrap();
        assert_eq!(bytes.len(), 20);
    }

    // ── Validation helper ────────────────────────────────────────

    #[test]
    fn is_valid_base32_check() {
        assert!(is_valid_base32("JBSWY3DPEHPK3PXP"));
        assert!(is_valid_base32("jbswy3dpehpk3pxp"));
        assert!(!is_valid_base32(""));
        assert!(!is_valid_base32("!!!"));
    }
}
