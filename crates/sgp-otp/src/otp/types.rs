//! Core types for the OTP engine.

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Configuration
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Smallest interoperable digit count.
pub const MIN_DIGITS: u8 = 6;
/// Largest interoperable digit count.
pub const MAX_DIGITS: u8 = 8;

/// Engine configuration. Hash algorithm is fixed to HMAC-SHA1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpConfig {
    /// Time window in seconds during which a code stays constant.
    pub period: u32,
    /// Number of digits in the generated code (6–8).
    pub digits: u8,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            period: 30,
            digits: 6,
        }
    }
}

impl OtpConfig {
    /// Builder: set the time period in seconds.
    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    /// Builder: set the digit count.
    pub fn with_digits(mut self, digits: u8) -> Self {
        self.digits = digits;
        self
    }

    /// Validate period and digit count.
    pub fn validate(&self) -> Result<(), OtpError> {
        if self.period == 0 {
            return Err(OtpError::new(
                OtpErrorKind::InvalidConfiguration,
                "Period must be a positive number of seconds",
            ));
        }
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&self.digits) {
            return Err(OtpError::new(
                OtpErrorKind::InvalidConfiguration,
                format!(
                    "Digit count must be between {} and {}, got {}",
                    MIN_DIGITS, MAX_DIGITS, self.digits
                ),
            ));
        }
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Generated code result
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A generated OTP code with associated timing info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedOtp {
    /// The OTP code string (e.g. "123456").
    pub code: String,
    /// Fraction of the current period elapsed, as a percentage in [0, 100).
    pub progress: f64,
    /// Seconds remaining until the code expires.
    pub remaining_seconds: u32,
    /// The time-step counter the code was computed from.
    pub counter: u64,
    /// Total period in seconds.
    pub period: u32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Verification result
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Result of verifying an OTP code against a secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResult {
    pub valid: bool,
    /// How many time-steps off the match was (0 = exact).
    pub drift: i64,
    /// The counter value that matched (if any).
    pub matched_counter: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Error type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Error kind for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtpErrorKind {
    /// Decoded key has zero length.
    EmptySecret,
    /// Input contains characters outside the base-32 alphabet.
    InvalidSecretEncoding,
    /// Period or digit count outside the accepted range.
    InvalidConfiguration,
    /// Keyed-hash initialisation failed.
    HmacKeyRejected,
}

/// Crate-level error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpError {
    pub kind: OtpErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl fmt::Display for OtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)?;
        if let Some(d) = &self.detail {
            write!(f, " ({})", d)?;
        }
        Ok(())
    }
}

impl std::error::Error for OtpError {}

impl OtpError {
    pub fn new(kind: OtpErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl From<OtpError> for String {
    fn from(e: OtpError) -> String {
        e.to_string()
    }
}
