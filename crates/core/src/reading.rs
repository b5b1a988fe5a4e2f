//! Device readings and derived-field calculation.
//!
//! A [`RawReading`] is the named-capture output of the extraction
//! pattern applied to one line of device output — a plain field-name →
//! string map, since the capture set is device-firmware dependent.
//! [`RawReading::derive`] computes the secondary metrics the firmware
//! does not report directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Link quality ×10 as reported by the device (e.g. `453` = 45.3%).
pub const FIELD_Q10: &str = "Q10";
/// Link quality percentage, derived: `Q10 / 10`.
pub const FIELD_Q: &str = "Q";
/// Signal-to-noise ratio as reported by the device firmware.
pub const FIELD_SNR: &str = "SNR";
/// Signal minus noise in dBm, derived locally (distinct from SNR).
pub const FIELD_SN: &str = "SN";
/// Signal level in dBm.
pub const FIELD_SIGNAL: &str = "signal";
/// Noise level in dBm.
pub const FIELD_NOISE: &str = "noise";

/// One device reading, fresh from pattern extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawReading {
    fields: BTreeMap<String, String>,
}

impl RawReading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a captured field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compute the derived fields `Q` and `SN`, consuming the raw
    /// reading.
    ///
    /// When `Q10` is absent or empty the reading passes through
    /// unchanged — that is how the presenter distinguishes "parsed but
    /// no numeric payload" from a fully derived reading. When `Q10` is
    /// present, `Q = Q10 / 10` (integer division; `Q10` is
    /// non-negative in practice), and if both `signal` and `noise` are
    /// present, `SN = signal - noise`. A non-numeric value in any of
    /// those fields is a device-protocol error, never a silent default.
    pub fn derive(self) -> Result<DerivedReading, ParseError> {
        let mut fields = self.fields;

        let q10 = fields
            .get(FIELD_Q10)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if let Some(q10) = q10 {
            let q10 = parse_int(FIELD_Q10, &q10)?;
            fields.insert(FIELD_Q.to_string(), (q10 / 10).to_string());

            let signal = fields.get(FIELD_SIGNAL).cloned();
            let noise = fields.get(FIELD_NOISE).cloned();
            if let (Some(signal), Some(noise)) = (signal, noise) {
                let signal = parse_int(FIELD_SIGNAL, &signal)?;
                let noise = parse_int(FIELD_NOISE, &noise)?;
                fields.insert(FIELD_SN.to_string(), (signal - noise).to_string());
            }
        }

        Ok(DerivedReading { fields })
    }
}

impl FromIterator<(String, String)> for RawReading {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A reading with derived fields merged in, ready for classification
/// and tooltip rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DerivedReading {
    fields: BTreeMap<String, String>,
}

impl DerivedReading {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// All fields, raw and derived.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// The numeric value of the named field, for threshold lookup.
    pub fn level(&self, key: &str) -> Result<i64, ParseError> {
        let value = self.get(key).ok_or_else(|| ParseError::MissingField {
            field: key.to_string(),
        })?;
        parse_int(key, value)
    }
}

fn parse_int(field: &str, value: &str) -> Result<i64, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::NotAnInteger {
            field: field.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn reading(pairs: &[(&str, &str)]) -> RawReading {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn quality_is_q10_over_ten() {
        for (q10, q) in [("0", "0"), ("150", "15"), ("349", "34"), ("350", "35"), ("1000", "100")] {
            let derived = reading(&[("Q10", q10)]).derive().expect("derivable");
            assert_eq!(derived.get(FIELD_Q), Some(q), "Q10={q10}");
        }
    }

    #[test]
    fn sn_is_signal_minus_noise() {
        let derived = reading(&[("Q10", "453"), ("signal", "-57"), ("noise", "-79")])
            .derive()
            .expect("derivable");
        assert_eq!(derived.get(FIELD_SN), Some("22"));
    }

    #[test]
    fn absent_q10_passes_through_unchanged() {
        let derived = reading(&[("signal", "-57"), ("noise", "-79")])
            .derive()
            .expect("derivable");
        assert_eq!(derived.get(FIELD_Q), None);
        assert_eq!(derived.get(FIELD_SN), None);
        assert_eq!(derived.get(FIELD_SIGNAL), Some("-57"));
    }

    #[test]
    fn empty_q10_passes_through_unchanged() {
        let derived = reading(&[("Q10", ""), ("signal", "-57"), ("noise", "-79")])
            .derive()
            .expect("derivable");
        assert_eq!(derived.get(FIELD_Q), None);
        assert_eq!(derived.get(FIELD_SN), None);
    }

    #[test]
    fn quality_without_signal_noise_skips_sn() {
        let derived = reading(&[("Q10", "160"), ("SNR", "15")]).derive().expect("derivable");
        assert_eq!(derived.get(FIELD_Q), Some("16"));
        assert_eq!(derived.get(FIELD_SN), None);
    }

    #[test]
    fn non_numeric_q10_is_a_parse_error() {
        assert_matches!(
            reading(&[("Q10", "lots")]).derive(),
            Err(ParseError::NotAnInteger { field, value }) if field == "Q10" && value == "lots"
        );
    }

    #[test]
    fn non_numeric_noise_is_a_parse_error() {
        assert_matches!(
            reading(&[("Q10", "453"), ("signal", "-57"), ("noise", "?")]).derive(),
            Err(ParseError::NotAnInteger { field, .. }) if field == "noise"
        );
    }

    #[test]
    fn level_reads_raw_or_derived_fields() {
        let derived = reading(&[("Q10", "160"), ("SNR", "15")]).derive().expect("derivable");
        assert_eq!(derived.level("Q"), Ok(16));
        assert_eq!(derived.level("Q10"), Ok(160));
        assert_eq!(derived.level("SNR"), Ok(15));
        assert_matches!(derived.level("SN"), Err(ParseError::MissingField { .. }));
    }
}
