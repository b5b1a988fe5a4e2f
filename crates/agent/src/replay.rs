//! Round-robin diagnostic sample source.
//!
//! With `LINKWATCH_REPLAY_FILE` set, the agent cycles through canned
//! samples from a JSON file instead of touching the network — useful
//! for exercising every icon and tooltip path against a shell without
//! a device at hand. Strictly diagnostic; the live path never retains
//! anything across cycles.
//!
//! Sample file format (an array, replayed in order, wrapping around):
//!
//! ```json
//! [
//!   { "type": "failure", "failure": { "kind": "timeout" } },
//!   { "type": "failure", "failure": { "kind": "no_connection" } },
//!   { "type": "reading", "fields": { "Q10": "150", "SNR": "5" } }
//! ]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use linkwatch_core::{Failure, RawReading};

/// The replay file could not be used. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("replay file {path:?} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("replay file {path:?} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("replay data contains no samples")]
    Empty,
}

/// One canned poll result.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Sample {
    /// A successful extraction: the captured field map.
    Reading { fields: RawReading },
    /// A fetch failure.
    Failure { failure: Failure },
}

/// Replays samples round-robin.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    samples: Vec<Sample>,
    next: usize,
}

impl ReplaySource {
    /// Build from an in-memory sample list (must be non-empty).
    pub fn new(samples: Vec<Sample>) -> Result<Self, ReplayError> {
        if samples.is_empty() {
            return Err(ReplayError::Empty);
        }
        Ok(Self { samples, next: 0 })
    }

    /// Load samples from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let data = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let samples: Vec<Sample> =
            serde_json::from_str(&data).map_err(|source| ReplayError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(samples)
    }

    /// The next sample, shaped like a live fetch result.
    pub fn next_poll(&mut self) -> Result<RawReading, Failure> {
        let sample = self.samples[self.next].clone();
        self.next = (self.next + 1) % self.samples.len();
        match sample {
            Sample::Reading { fields } => Ok(fields),
            Sample::Failure { failure } => Err(failure),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SAMPLES: &str = r#"[
        { "type": "failure", "failure": { "kind": "timeout" } },
        { "type": "reading", "fields": { "Q10": "150", "SNR": "5" } }
    ]"#;

    fn source() -> ReplaySource {
        let samples: Vec<Sample> = serde_json::from_str(SAMPLES).expect("valid samples");
        ReplaySource::new(samples).expect("non-empty")
    }

    #[test]
    fn replays_in_order() {
        let mut source = source();
        assert_matches!(source.next_poll(), Err(Failure::Timeout));
        let reading = source.next_poll().expect("reading sample");
        assert_eq!(reading.get("Q10"), Some("150"));
    }

    #[test]
    fn wraps_around() {
        let mut source = source();
        for _ in 0..source.len() {
            source.next_poll().ok();
        }
        assert_matches!(source.next_poll(), Err(Failure::Timeout));
    }

    #[test]
    fn parses_failure_kinds() {
        let json = r#"[
            { "type": "failure", "failure": { "kind": "http", "status": 500, "reason": "Internal Server Error" } },
            { "type": "failure", "failure": { "kind": "network", "code": 111, "reason": "connection refused" } },
            { "type": "failure", "failure": { "kind": "no_connection" } }
        ]"#;
        let samples: Vec<Sample> = serde_json::from_str(json).expect("valid samples");
        let mut source = ReplaySource::new(samples).expect("non-empty");
        assert_matches!(source.next_poll(), Err(Failure::Http { status: 500, .. }));
        assert_matches!(source.next_poll(), Err(Failure::Network { code: Some(111), .. }));
        assert_matches!(source.next_poll(), Err(Failure::NoConnection));
    }

    #[test]
    fn empty_sample_list_is_rejected() {
        assert_matches!(ReplaySource::new(Vec::new()), Err(ReplayError::Empty));
    }
}
