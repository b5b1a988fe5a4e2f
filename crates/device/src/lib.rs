//! Remote device polling: HTTP fetch + pattern extraction.
//!
//! One [`DeviceClient::fetch`] is one attempt: an HTTP GET against the
//! device's status page, scanned line by line with the configured
//! named-capture pattern. Retry policy, if any, belongs to the
//! caller's polling loop.

pub mod client;
pub mod pattern;

pub use client::{ClientError, DeviceClient};
pub use pattern::{ExtractionPattern, PatternError};
