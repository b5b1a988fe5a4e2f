//! Fetch failure taxonomy.
//!
//! A [`Failure`] is a domain value, not a Rust error: it flows into
//! presentation exactly like a reading does, selecting the error icon
//! and an explanatory tooltip. It never carries reading fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Threshold-table label selecting the generic failure icon.
pub const LABEL_ERROR: &str = "error";
/// Threshold-table label selecting the link-down icon.
pub const LABEL_NOCON: &str = "nocon";

/// Why a poll cycle produced no reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// The request did not complete within the configured timeout.
    Timeout,

    /// The device answered, but no line of the body matched the
    /// extraction pattern — typically the wireless table is empty
    /// because the link is down.
    NoConnection,

    /// The device answered with a non-2xx status.
    Http { status: u16, reason: String },

    /// The request failed below HTTP: DNS, refusal, reset.
    Network { code: Option<i32>, reason: String },
}

impl Failure {
    /// Canonical threshold-table label for this failure.
    ///
    /// `nocon` is visually distinct from `error` so a down link is not
    /// mistaken for a broken device or a misconfigured URL.
    pub fn label(&self) -> &'static str {
        match self {
            Failure::NoConnection => LABEL_NOCON,
            _ => LABEL_ERROR,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Timeout => write!(f, "connection timeout"),
            Failure::NoConnection => write!(f, "no wifi connection"),
            Failure::Http { status, reason } => write!(f, "http {status} {reason}"),
            Failure::Network {
                code: Some(code),
                reason,
            } => write!(f, "url [{code}] {reason}"),
            Failure::Network { code: None, reason } => write!(f, "url {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_no_connection_maps_to_nocon() {
        assert_eq!(Failure::NoConnection.label(), "nocon");
        assert_eq!(Failure::Timeout.label(), "error");
        assert_eq!(
            Failure::Http {
                status: 500,
                reason: "Internal Server Error".into()
            }
            .label(),
            "error"
        );
        assert_eq!(
            Failure::Network {
                code: Some(111),
                reason: "connection refused".into()
            }
            .label(),
            "error"
        );
    }

    #[test]
    fn serde_form_is_kind_tagged() {
        // The replay sample format depends on these exact tags.
        let json = serde_json::to_value(&Failure::NoConnection).expect("serializable");
        assert_eq!(json, serde_json::json!({ "kind": "no_connection" }));

        let json = serde_json::to_value(&Failure::Http {
            status: 500,
            reason: "Internal Server Error".into(),
        })
        .expect("serializable");
        assert_eq!(json["kind"], "http");
        assert_eq!(json["status"], 500);

        let back: Failure =
            serde_json::from_str(r#"{ "kind": "network", "code": 111, "reason": "refused" }"#)
                .expect("deserializable");
        assert_eq!(
            back,
            Failure::Network {
                code: Some(111),
                reason: "refused".into()
            }
        );
    }

    #[test]
    fn descriptions_carry_the_cause() {
        let http = Failure::Http {
            status: 500,
            reason: "Internal Server Error".into(),
        };
        assert_eq!(http.to_string(), "http 500 Internal Server Error");

        let net = Failure::Network {
            code: Some(111),
            reason: "connection refused".into(),
        };
        assert_eq!(net.to_string(), "url [111] connection refused");
    }
}
