//! Timer-driven poll loop.
//!
//! One tokio task drives the whole cycle — fetch, derive, classify,
//! format — so a cycle always runs to completion before the next tick
//! is processed and fetches never overlap. Every cycle ends in a
//! published [`TrayStatus`], error or not; nothing short of `Exit`
//! stops the timer.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use linkwatch_core::failure::LABEL_ERROR;
use linkwatch_core::{Failure, PollOutcome, Presentation, Presenter, RawReading};
use linkwatch_device::DeviceClient;

use crate::icons::IconSet;
use crate::replay::ReplaySource;

/// Control messages for the loop. Both are plain pass-throughs from
/// whatever the shell wires up (signals, menu entries).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run a cycle now, without waiting for the next tick.
    Refresh,
    /// Drain and return.
    Exit,
}

/// What the tray shell displays, published once per cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrayStatus {
    /// Matched threshold (or failure sentinel) label.
    pub icon_label: String,
    /// Resolved icon file, when the icon directory has one.
    pub icon_path: Option<PathBuf>,
    /// Human-readable status detail.
    pub tooltip: String,
    /// RFC 3339 timestamp of the cycle.
    pub checked_at: String,
}

/// Where readings come from: the live device, or canned samples.
pub enum Source {
    Live(DeviceClient),
    Replay(ReplaySource),
}

impl Source {
    async fn poll(&mut self) -> Result<RawReading, Failure> {
        match self {
            Source::Live(client) => client.fetch().await,
            Source::Replay(replay) => replay.next_poll(),
        }
    }
}

/// The poll loop and its immutable collaborators.
pub struct Monitor {
    source: Source,
    presenter: Presenter,
    icons: IconSet,
}

impl Monitor {
    pub fn new(source: Source, presenter: Presenter, icons: IconSet) -> Self {
        Self {
            source,
            presenter,
            icons,
        }
    }

    /// Run until `Exit` (or until the command channel closes).
    ///
    /// The first cycle runs immediately; afterwards one cycle per
    /// `interval` tick. `Refresh` runs a cycle right away and pushes
    /// the next scheduled tick out by a full interval.
    pub async fn run(
        mut self,
        interval: std::time::Duration,
        mut commands: mpsc::Receiver<Command>,
        status: watch::Sender<Option<TrayStatus>>,
    ) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.publish(&status).await;
                }
                command = commands.recv() => match command {
                    Some(Command::Refresh) => {
                        ticker.reset();
                        self.publish(&status).await;
                    }
                    Some(Command::Exit) | None => {
                        tracing::info!("Poll loop exiting");
                        break;
                    }
                },
            }
        }
    }

    async fn publish(&mut self, status: &watch::Sender<Option<TrayStatus>>) {
        let update = self.poll_once().await;
        tracing::info!(
            icon = %update.icon_label,
            tooltip = %update.tooltip,
            "Status updated",
        );
        status.send_replace(Some(update));
    }

    /// Run one full cycle and return the resulting status.
    ///
    /// Never fails: derive, classification, and template errors are
    /// rendered through the `error` sentinel so a bad cycle shows up
    /// in the tray instead of killing the loop.
    pub async fn poll_once(&mut self) -> TrayStatus {
        let presentation = match self.source.poll().await {
            Ok(raw) => match raw.derive() {
                Ok(derived) => self.present(&PollOutcome::Reading(derived)),
                Err(e) => {
                    tracing::warn!(error = %e, "Device reading did not derive");
                    self.present_error(&e.to_string())
                }
            },
            Err(failure) => {
                tracing::debug!(label = failure.label(), failure = %failure, "Fetch failed");
                self.present(&PollOutcome::Failed(failure))
            }
        };

        TrayStatus {
            icon_path: self.icons.resolve(&presentation.icon_label),
            icon_label: presentation.icon_label,
            tooltip: presentation.tooltip,
            checked_at: Utc::now().to_rfc3339(),
        }
    }

    fn present(&self, outcome: &PollOutcome) -> Presentation {
        match self.presenter.present(outcome) {
            Ok(presentation) => presentation,
            Err(e) => {
                tracing::warn!(error = %e, "Cycle did not present");
                self.present_error(&e.to_string())
            }
        }
    }

    /// Render an error description, falling back to a bare
    /// presentation if even the error sentinel is unusable (e.g. the
    /// configured table has no `error` entry).
    fn present_error(&self, desc: &str) -> Presentation {
        self.presenter.present_error(desc).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Error sentinel is unusable, presenting bare status");
            Presentation {
                icon_label: LABEL_ERROR.to_string(),
                tooltip: desc.to_string(),
            }
        })
    }
}
