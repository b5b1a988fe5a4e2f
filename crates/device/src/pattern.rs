//! Named-capture extraction over device status pages.
//!
//! The pattern is device-firmware configuration, not code: different
//! dd-wrt builds emit different `setWirelessTable(...)` argument lists,
//! so the regex is supplied externally and treated as opaque. The only
//! structural requirement is at least one named capture group — the
//! group names become the reading's field names.

use linkwatch_core::RawReading;
use regex::Regex;

/// The configured extraction regex is unusable.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// The regex does not compile.
    #[error("extraction pattern does not compile: {0}")]
    Invalid(#[from] regex::Error),

    /// The regex compiles but has no named capture groups, so a match
    /// could never produce any reading fields.
    #[error("extraction pattern has no named capture groups")]
    NoNamedGroups,
}

/// A validated named-capture pattern.
#[derive(Debug, Clone)]
pub struct ExtractionPattern {
    regex: Regex,
}

impl ExtractionPattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern)?;
        if regex.capture_names().flatten().next().is_none() {
            return Err(PatternError::NoNamedGroups);
        }
        Ok(Self { regex })
    }

    /// Scan a response body line by line.
    ///
    /// The first matching line produces the reading and scanning stops
    /// there; the remainder of the body is never examined.
    pub fn extract(&self, body: &str) -> Option<RawReading> {
        body.lines().find_map(|line| self.extract_line(line))
    }

    /// Apply the pattern to a single line.
    pub fn extract_line(&self, line: &str) -> Option<RawReading> {
        let caps = self.regex.captures(line)?;
        let mut reading = RawReading::new();
        for name in self.regex.capture_names().flatten() {
            if let Some(m) = caps.name(name) {
                reading.set(name, m.as_str());
            }
        }
        Some(reading)
    }
}
