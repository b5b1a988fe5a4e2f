//! Signal threshold table: parsing and classification.
//!
//! The table maps a minimum numeric signal level to a classification
//! label (which doubles as the icon name), e.g.
//! `-2:error, -1:nocon, 0:low, 16:medium, 35:high`. Negative levels
//! are conventionally reserved for the error/no-connection sentinels,
//! which are only ever reached through [`ThresholdTable::entry_for_label`]
//! because a failure never produces a numeric reading.

use crate::error::ConfigError;

/// One `level:label` band of the signal table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdEntry {
    /// Inclusive lower bound of the band.
    pub level: i64,
    /// Free-form label, also the icon selector key.
    pub label: String,
}

/// Ordered sequence of threshold bands, ascending by level.
///
/// Built once from configuration and immutable afterwards. Table sizes
/// are single-digit, so lookups are linear scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdTable {
    entries: Vec<ThresholdEntry>,
}

impl ThresholdTable {
    /// Parse a comma-separated `level:label` spec string.
    ///
    /// Whitespace around entries and around the colon is insignificant.
    /// Entries need not be pre-sorted; the table is sorted ascending by
    /// level here so classification never depends on input order.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();

        for raw in spec.split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let (level, label) = raw.split_once(':').ok_or_else(|| {
                ConfigError::MissingSeparator {
                    entry: raw.to_string(),
                }
            })?;
            let (level, label) = (level.trim(), label.trim());

            let level: i64 = level.parse().map_err(|_| ConfigError::InvalidLevel {
                entry: raw.to_string(),
                level: level.to_string(),
            })?;
            if label.is_empty() {
                return Err(ConfigError::EmptyLabel {
                    entry: raw.to_string(),
                });
            }

            entries.push(ThresholdEntry {
                level,
                label: label.to_string(),
            });
        }

        if entries.is_empty() {
            return Err(ConfigError::EmptySpec);
        }

        // Stable sort: equal levels keep their configured order.
        entries.sort_by_key(|e| e.level);

        Ok(Self { entries })
    }

    /// Floor lookup: the last entry whose level is `<= level`.
    ///
    /// The scan stops at the first entry whose level is strictly
    /// greater, so a reading equal to a band boundary belongs to the
    /// higher band. Returns `None` iff `level` is below every entry.
    pub fn entry_for_level(&self, level: i64) -> Option<&ThresholdEntry> {
        let mut found = None;
        for entry in &self.entries {
            if level < entry.level {
                break;
            }
            found = Some(entry);
        }
        found
    }

    /// First entry whose label matches exactly.
    ///
    /// Used for the failure path, where there is no numeric level to
    /// classify. Errors if the configuration lacks the label — callers
    /// must guarantee the table covers every failure label.
    pub fn entry_for_label(&self, label: &str) -> Result<&ThresholdEntry, ConfigError> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .ok_or_else(|| ConfigError::UnknownLabel {
                label: label.to_string(),
            })
    }

    /// Entries in ascending level order.
    pub fn entries(&self) -> &[ThresholdEntry] {
        &self.entries
    }
}
