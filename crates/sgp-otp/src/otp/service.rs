//! Presentation-boundary service.
//!
//! Wraps the core generator for a UI refresh loop: configuration is
//! validated once, secrets come from the caller (e.g. a vault record), and
//! failures are rendered as a dashed placeholder with zero progress instead
//! of a code. The core itself never produces sentinel values; that mapping
//! lives only here.

use crate::otp::core;
use crate::otp::types::{GeneratedOtp, OtpConfig, OtpError};
use serde::{Deserialize, Serialize};

/// What a UI shows for one secret on each refresh tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpDisplay {
    /// The code, or a run of dashes when generation failed.
    pub code: String,
    /// Period progress percentage in [0, 100); 0 on failure.
    pub progress: f64,
}

/// Stateless code-generation service for a fixed configuration.
#[derive(Debug, Clone, Copy)]
pub struct OtpService {
    config: OtpConfig,
}

impl OtpService {
    /// Create a service, validating the configuration up front.
    pub fn new(config: OtpConfig) -> Result<Self, OtpError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> OtpConfig {
        self.config
    }

    /// Generate a code for a caller-supplied secret, with typed errors.
    pub fn code_for_secret(&self, secret: &str) -> Result<GeneratedOtp, OtpError> {
        core::generate_totp(secret, self.config)
    }

    /// Generate at an explicit timestamp (refresh loops and tests).
    pub fn code_for_secret_at(
        &self,
        secret: &str,
        unix_seconds: u64,
    ) -> Result<GeneratedOtp, OtpError> {
        core::generate_totp_at(secret, self.config, unix_seconds)
    }

    /// Render for display, mapping any failure to the dashed placeholder.
    pub fn display_for_secret(&self, secret: &str) -> OtpDisplay {
        self.display_for_secret_at(secret, core::current_unix_time())
    }

    /// Render for display at an explicit timestamp.
    pub fn display_for_secret_at(&self, secret: &str, unix_seconds: u64) -> OtpDisplay {
        match core::generate_totp_at(secret, self.config, unix_seconds) {
            Ok(otp) => OtpDisplay {
                code: otp.code,
                progress: otp.progress,
            },
            Err(e) => {
                log::warn!("OTP generation failed, rendering placeholder: {}", e);
                OtpDisplay {
                    code: "-".repeat(self.config.digits as usize),
                    progress: 0.0,
                }
            }
        }
    }
}

/// Format an OTP code with a space in the middle (e.g. "123 456").
pub fn format_code_display(code: &str) -> String {
    if code.len() <= 4 {
        return code.to_string();
    }
    let mid = code.len() / 2;
    format!("{} {}", &code[..mid], &code[mid..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::otp::types::OtpErrorKind;

    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[test]
    fn service_rejects_bad_config() {
        let err = OtpService::new(OtpConfig::default().with_period(0)).unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::InvalidConfiguration);
    }

    #[test]
    fn service_passes_through_typed_errors() {
        let svc = OtpService::new(OtpConfig::default()).unwrap();
        let err = svc.code_for_secret("not base32!").unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::InvalidSecretEncoding);
    }

    #[test]
    fn display_renders_code_and_progress() {
        let svc = OtpService::new(OtpConfig::default()).unwrap();
        let display = svc.display_for_secret_at(RFC_SECRET, 59);
        assert_eq!(display.code, "287082");
        assert!((0.0..100.0).contains(&display.progress));
    }

    #[test]
    fn display_falls_back_to_dashes() {
        let svc = OtpService::new(OtpConfig::default().with_digits(8)).unwrap();
        let display = svc.display_for_secret_at("!!!", 59);
        assert_eq!(display.code, "--------");
        assert_eq!(display.progress, 0.0);
    }

    #[test]
    fn format_code_split() {
        assert_eq!(format_code_display("123456"), "123 456");
        assert_eq!(format_code_display("12345678"), "1234 5678");
        assert_eq!(format_code_display("1234"), "1234");
    }
}
