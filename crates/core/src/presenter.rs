//! Presentation formatting: reading-or-failure → icon label + tooltip.
//!
//! The [`Presenter`] owns the immutable pieces of per-cycle
//! presentation (threshold table, classification key, tooltip
//! templates) and turns each cycle's [`PollOutcome`] into the
//! [`Presentation`] a tray shell displays. It holds no mutable state,
//! so formatting the same outcome twice yields identical results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ConfigError, FormatError};
use crate::failure::{Failure, LABEL_ERROR};
use crate::reading::{DerivedReading, FIELD_Q, FIELD_Q10, FIELD_SN, FIELD_SNR};
use crate::template;
use crate::thresholds::ThresholdTable;

/// Field names the threshold lookup may be keyed on.
pub const CLASSIFICATION_KEYS: [&str; 4] = [FIELD_Q, FIELD_Q10, FIELD_SNR, FIELD_SN];

/// Tooltip field carrying the failure description in error templates.
const FIELD_DESC: &str = "desc";

/// The result of one poll cycle, as handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Reading(DerivedReading),
    Failed(Failure),
}

/// What the tray shell should display for one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    /// Matched threshold label (or failure sentinel label); selects
    /// the icon.
    pub icon_label: String,
    /// Human-readable status detail.
    pub tooltip: String,
}

/// Immutable presentation configuration for the process lifetime.
#[derive(Debug, Clone)]
pub struct Presenter {
    table: ThresholdTable,
    key: String,
    tooltip: String,
    tooltip_error: String,
    no_wifi: String,
}

impl Presenter {
    /// Build a presenter.
    ///
    /// * `key` — the reading field that drives the threshold lookup;
    ///   must be one of [`CLASSIFICATION_KEYS`].
    /// * `tooltip` / `tooltip_error` — success and failure templates
    ///   (see [`template`]); the error template sees a single `desc`
    ///   field.
    /// * `no_wifi` — description used for [`Failure::NoConnection`].
    pub fn new(
        table: ThresholdTable,
        key: &str,
        tooltip: &str,
        tooltip_error: &str,
        no_wifi: &str,
    ) -> Result<Self, ConfigError> {
        if !CLASSIFICATION_KEYS.contains(&key) {
            return Err(ConfigError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(Self {
            table,
            key: key.to_string(),
            tooltip: tooltip.to_string(),
            tooltip_error: tooltip_error.to_string(),
            no_wifi: no_wifi.to_string(),
        })
    }

    /// Format one cycle's outcome.
    pub fn present(&self, outcome: &PollOutcome) -> Result<Presentation, FormatError> {
        match outcome {
            PollOutcome::Reading(reading) => self.present_reading(reading),
            PollOutcome::Failed(failure) => self.present_failure(failure),
        }
    }

    /// Format an arbitrary cycle error (derive/format problems) under
    /// the `error` sentinel.
    pub fn present_error(&self, desc: &str) -> Result<Presentation, FormatError> {
        let entry = self.table.entry_for_label(LABEL_ERROR)?;
        let mut fields = BTreeMap::new();
        fields.insert(FIELD_DESC.to_string(), desc.to_string());
        Ok(Presentation {
            icon_label: entry.label.clone(),
            tooltip: template::render(&self.tooltip_error, &fields)?,
        })
    }

    fn present_reading(&self, reading: &DerivedReading) -> Result<Presentation, FormatError> {
        let level = reading.level(&self.key)?;
        let entry = self
            .table
            .entry_for_level(level)
            .ok_or(ConfigError::Uncovered { level })?;
        Ok(Presentation {
            icon_label: entry.label.clone(),
            tooltip: template::render(&self.tooltip, reading.fields())?,
        })
    }

    fn present_failure(&self, failure: &Failure) -> Result<Presentation, FormatError> {
        let entry = self.table.entry_for_label(failure.label())?;
        let desc = match failure {
            Failure::NoConnection => self.no_wifi.clone(),
            other => other.to_string(),
        };
        let mut fields = BTreeMap::new();
        fields.insert(FIELD_DESC.to_string(), desc);
        Ok(Presentation {
            icon_label: entry.label.clone(),
            tooltip: template::render(&self.tooltip_error, &fields)?,
        })
    }
}
