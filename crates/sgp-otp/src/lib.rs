//! # SMS Gate Push – OTP Engine
//!
//! Time-based and counter-based one-time password engine:
//!
//! - **RFC 4226 / 6238** – HOTP & TOTP generation with HMAC-SHA1
//! - **Base-32 secrets** – From-scratch RFC 4648 decoding (case-insensitive,
//!   padding-tolerant) plus random secret generation
//! - **Time-window progress** – Counter, remaining-seconds, and `[0, 100)`
//!   progress tracking for 1-second UI refresh loops
//! - **Typed failures** – `EmptySecret` / `InvalidSecretEncoding` /
//!   `InvalidConfiguration` / `HmacKeyRejected`; sentinel rendering happens
//!   only at the presentation boundary
//! - **Verification** – Drift-window code checking with constant-time
//!   comparison
//!
//! The engine is stateless and purely computational: it depends only on a
//! clock source and a keyed-HMAC primitive, never on storage or UI.

pub mod otp;
