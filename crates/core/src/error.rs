//! Error types shared across the classification engine.
//!
//! [`Failure`](crate::failure::Failure) is deliberately *not* here:
//! a fetch failure is a domain value that flows into presentation,
//! not an error that unwinds the cycle.

/// Problems with the configured threshold table or classification key.
///
/// Fatal to the current cycle (or to startup, when raised while
/// building the table), never to the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The threshold spec string contains no entries.
    #[error("threshold spec is empty")]
    EmptySpec,

    /// An entry has no `:` between level and label.
    #[error("threshold entry '{entry}' is missing the ':' separator")]
    MissingSeparator { entry: String },

    /// An entry's level is not an integer.
    #[error("threshold entry '{entry}' has a non-integer level '{level}'")]
    InvalidLevel { entry: String, level: String },

    /// An entry's label is empty after trimming.
    #[error("threshold entry '{entry}' has an empty label")]
    EmptyLabel { entry: String },

    /// A label lookup found no matching entry. The configured table
    /// must contain an entry for every failure label the agent can
    /// produce; there is no fallback.
    #[error("no threshold entry is labelled '{label}'")]
    UnknownLabel { label: String },

    /// A numeric lookup fell below every entry in the table, meaning
    /// the configuration does not cover the lowest possible reading.
    #[error("no threshold entry covers level {level}")]
    Uncovered { level: i64 },

    /// The classification key is not one of the recognised field names.
    #[error("classification key '{key}' is not one of Q, Q10, SNR, SN")]
    InvalidKey { key: String },
}

/// A device response field that should be numeric is missing or
/// malformed. Fatal to the cycle that produced the reading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The reading does not carry the named field at all.
    #[error("device reading has no '{field}' field")]
    MissingField { field: String },

    /// The field is present but does not parse as an integer.
    #[error("device field '{field}' is not an integer: '{value}'")]
    NotAnInteger { field: String, value: String },
}

/// Presentation could not be produced from an otherwise valid cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A tooltip template placeholder names a field the reading does
    /// not carry.
    #[error("tooltip template references unknown field '{name}'")]
    UnknownField { name: String },

    /// A `{` placeholder was never closed.
    #[error("tooltip template has an unterminated placeholder")]
    UnterminatedPlaceholder,

    /// A stray `}` with no opening brace.
    #[error("tooltip template has an unmatched '}}'")]
    UnmatchedBrace,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
