//! Pure wireless-link classification engine.
//!
//! Everything in this crate is toolkit-independent and I/O-free: it
//! takes a device reading (or a fetch failure) plus a configured
//! threshold table and produces the icon label and tooltip text a
//! tray shell should display. Fetching readings is the job of
//! `linkwatch-device`; rendering pixels is the shell's.

pub mod error;
pub mod failure;
pub mod presenter;
pub mod reading;
pub mod template;
pub mod thresholds;

pub use error::{ConfigError, FormatError, ParseError};
pub use failure::Failure;
pub use presenter::{PollOutcome, Presentation, Presenter};
pub use reading::{DerivedReading, RawReading};
pub use thresholds::{ThresholdEntry, ThresholdTable};
