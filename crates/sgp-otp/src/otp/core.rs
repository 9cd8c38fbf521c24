//! Core OTP generation — RFC 4226 (HOTP) and RFC 6238 (TOTP).
//!
//! HMAC-SHA1 over a big-endian counter, dynamic truncation, time-step and
//! progress derivation, and code verification with a configurable drift
//! window. Every function is a pure computation over its inputs; failures
//! surface as typed errors, never as sentinel codes.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::otp::secret::decode_base32;
use crate::otp::types::{GeneratedOtp, OtpConfig, OtpError, OtpErrorKind, VerifyResult};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Raw HMAC-OTP (RFC 4226 §5.3)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compute an HOTP code for the given raw key bytes and counter.
pub fn hotp(key: &[u8], counter: u64, digits: u8) -> Result<String, OtpError> {
    let mut mac = Hmac::<Sha1>::new_from_slice(key).map_err(|e| {
        OtpError::new(OtpErrorKind::HmacKeyRejected, "HMAC key was rejected")
            .with_detail(e.to_string())
    })?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(truncate(&digest, digits))
}

/// Dynamic truncation per RFC 4226 §5.3.
///
/// The offset comes from the low nibble of the digest's last byte, so it is
/// always in 0–15 and four bytes remain within a 20-byte SHA-1 digest. The
/// sign bit of the first selected byte is cleared to yield a 31-bit value.
fn truncate(digest: &[u8], digits: u8) -> String {
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary: u32 = ((u32::from(digest[offset]) & 0x7f) << 24)
        | (u32::from(digest[offset + 1]) << 16)
        | (u32::from(digest[offset + 2]) << 8)
        | u32::from(digest[offset + 3]);
    let code = binary % 10u32.pow(u32::from(digits));
    format!("{:0>width$}", code, width = digits as usize)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Counter & progress derivation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Time-step counter for a unix timestamp: `floor(now / period)`.
pub fn time_step_at(unix_seconds: u64, period: u32) -> u64 {
    unix_seconds / u64::from(period)
}

/// Fraction of the current period elapsed, as a percentage in [0, 100).
pub fn progress_percent_at(unix_seconds: u64, period: u32) -> f64 {
    let elapsed = (unix_seconds % u64::from(period)) as f64;
    elapsed / f64::from(period) * 100.0
}

/// Seconds remaining until the current time-step expires.
pub fn seconds_remaining_at(unix_seconds: u64, period: u32) -> u32 {
    let p = u64::from(period);
    (p - (unix_seconds % p)) as u32
}

/// Current unix timestamp, truncated to whole seconds.
pub fn current_unix_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  HOTP (counter-based, RFC 4226)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Generate an HOTP code from a base-32 encoded secret.
pub fn generate_hotp(secret_b32: &str, counter: u64, digits: u8) -> Result<String, OtpError> {
    OtpConfig::default().with_digits(digits).validate()?;
    let key = decode_base32(secret_b32)?;
    hotp(&key, counter, digits)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TOTP (time-based, RFC 6238)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Generate a TOTP code from a base-32 secret, at the current time.
pub fn generate_totp(secret_b32: &str, config: OtpConfig) -> Result<GeneratedOtp, OtpError> {
    generate_totp_at(secret_b32, config, current_unix_time())
}

/// Generate a TOTP code at an explicit unix timestamp.
pub fn generate_totp_at(
    secret_b32: &str,
    config: OtpConfig,
    unix_seconds: u64,
) -> Result<GeneratedOtp, OtpError> {
    config.validate()?;
    let key = decode_base32(secret_b32)?;
    let counter = time_step_at(unix_seconds, config.period);
    let code = hotp(&key, counter, config.digits)?;
    Ok(GeneratedOtp {
        code,
        progress: progress_percent_at(unix_seconds, config.period),
        remaining_seconds: seconds_remaining_at(unix_seconds, config.period),
        counter,
        period: config.period,
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Verification
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Verify a TOTP code at the current time.
///
/// `drift_window` specifies how many time-steps to check on either side of
/// the current step (1 checks ±1).
pub fn verify_totp(
    secret_b32: &str,
    config: OtpConfig,
    code: &str,
    drift_window: u32,
) -> Result<VerifyResult, OtpError> {
    verify_totp_at(secret_b32, config, code, drift_window, current_unix_time())
}

/// Verify a TOTP code at a specific timestamp.
pub fn verify_totp_at(
    secret_b32: &str,
    config: OtpConfig,
    code: &str,
    drift_window: u32,
    unix_seconds: u64,
) -> Result<VerifyResult, OtpError> {
    config.validate()?;
    let key = decode_base32(secret_b32)?;
    let base_counter = time_step_at(unix_seconds, config.period);

    // The candidate must be digits-only and the right length.
    if code.len() != config.digits as usize || !code.chars().all(|c| c.is_ascii_digit()) {
        return Ok(VerifyResult {
            valid: false,
            drift: 0,
            matched_counter: None,
        });
    }

    let start = base_counter.saturating_sub(u64::from(drift_window));
    let end = base_counter + u64::from(drift_window);
    for counter in start..=end {
        let generated = hotp(&key, counter, config.digits)?;
        if constant_time_eq(generated.as_bytes(), code.as_bytes()) {
            return Ok(VerifyResult {
                valid: true,
                drift: counter as i64 - base_counter as i64,
                matched_counter: Some(counter),
            });
        }
    }

    Ok(VerifyResult {
        valid: false,
        drift: 0,
        matched_counter: None,
    })
}

/// Constant-time comparison (to prevent timing attacks on code verification).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
