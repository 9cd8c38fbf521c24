//! OTP engine: sub-modules.

pub mod types;
pub mod secret;
pub mod core;
pub mod service;

// Re-export top-level items for convenience.
pub use self::core::{generate_hotp, generate_totp, generate_totp_at, verify_totp, verify_totp_at};
pub use secret::{decode_base32, encode_base32, generate_secret, is_valid_base32};
pub use service::{format_code_display, OtpDisplay, OtpService};
pub use types::*;
