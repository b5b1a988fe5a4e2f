//! `linkwatch-agent` -- wifi link quality monitor daemon.
//!
//! Polls a remote wireless device's status page (dd-wrt style, no
//! login), classifies the extracted link quality through the
//! configured threshold table, and publishes one status line per
//! cycle as JSON on stdout for a tray shell to render:
//!
//! ```json
//! {"icon_label":"medium","icon_path":"icon/128/medium.png","tooltip":"SNR: 15 / Q: 16%","checked_at":"..."}
//! ```
//!
//! Configuration is environment-variable based; see [`config`] for the
//! full table. `SIGUSR1` forces an immediate refresh; `SIGINT` /
//! `SIGTERM` exit cleanly.

use tokio::sync::{mpsc, watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linkwatch_agent::config::Config;
use linkwatch_agent::icons::IconSet;
use linkwatch_agent::monitor::{Command, Monitor, Source, TrayStatus};
use linkwatch_agent::replay::ReplaySource;
use linkwatch_core::{Presenter, ThresholdTable};
use linkwatch_device::{DeviceClient, ExtractionPattern};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkwatch_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();

    let table = match ThresholdTable::parse(&config.table) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(error = %e, "LINKWATCH_TABLE is not a valid threshold spec");
            std::process::exit(1);
        }
    };

    let presenter = match Presenter::new(
        table,
        &config.key,
        &config.tooltip,
        &config.tooltip_error,
        &config.no_wifi,
    ) {
        Ok(presenter) => presenter,
        Err(e) => {
            tracing::error!(error = %e, "LINKWATCH_KEY is not usable");
            std::process::exit(1);
        }
    };

    let source = match build_source(&config) {
        Ok(source) => source,
        Err(message) => {
            tracing::error!("{message}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        url = %config.url,
        key = %config.key,
        interval_secs = config.interval.as_secs(),
        replay = config.replay_file.is_some(),
        "Starting linkwatch-agent",
    );

    let (command_tx, command_rx) = mpsc::channel::<Command>(4);
    let (status_tx, status_rx) = watch::channel::<Option<TrayStatus>>(None);

    tokio::spawn(emit_status_lines(status_rx));
    tokio::spawn(forward_signals(command_tx));

    let monitor = Monitor::new(source, presenter, IconSet::new(&config.icon_dir));
    monitor.run(config.interval, command_rx, status_tx).await;

    tracing::info!("linkwatch-agent stopped");
}

/// Live device client, or the replay source in diagnostic mode.
fn build_source(config: &Config) -> Result<Source, String> {
    if let Some(path) = &config.replay_file {
        let replay = ReplaySource::load(path)
            .map_err(|e| format!("LINKWATCH_REPLAY_FILE is not usable: {e}"))?;
        tracing::info!(path = %path.display(), samples = replay.len(), "Replay mode");
        return Ok(Source::Replay(replay));
    }

    let pattern = ExtractionPattern::new(&config.pattern)
        .map_err(|e| format!("LINKWATCH_PATTERN is not usable: {e}"))?;
    let client = DeviceClient::new(config.url.clone(), pattern, config.timeout)
        .map_err(|e| format!("device HTTP client could not be built: {e}"))?;
    Ok(Source::Live(client))
}

/// Print each published status as one JSON line on stdout.
async fn emit_status_lines(mut status_rx: watch::Receiver<Option<TrayStatus>>) {
    while status_rx.changed().await.is_ok() {
        let status = status_rx.borrow_and_update().clone();
        if let Some(status) = status {
            let line =
                serde_json::to_string(&status).expect("TrayStatus is always serialisable");
            println!("{line}");
        }
    }
}

/// Translate process signals into loop commands.
async fn forward_signals(command_tx: mpsc::Sender<Command>) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut usr1 = match signal(SignalKind::user_defined1()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(error = %e, "SIGUSR1 handler unavailable, refresh disabled");
                return wait_for_shutdown(command_tx).await;
            }
        };
        let mut term = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                return wait_for_shutdown(command_tx).await;
            }
        };

        loop {
            tokio::select! {
                _ = usr1.recv() => {
                    tracing::debug!("SIGUSR1 received, forcing refresh");
                    if command_tx.send(Command::Refresh).await.is_err() {
                        return;
                    }
                }
                _ = term.recv() => {
                    tracing::info!("SIGTERM received");
                    let _ = command_tx.send(Command::Exit).await;
                    return;
                }
                result = tokio::signal::ctrl_c() => {
                    if result.is_ok() {
                        tracing::info!("SIGINT received");
                    }
                    let _ = command_tx.send(Command::Exit).await;
                    return;
                }
            }
        }
    }

    #[cfg(not(unix))]
    wait_for_shutdown(command_tx).await;
}

/// Fallback shutdown wiring: ctrl-c only.
async fn wait_for_shutdown(command_tx: mpsc::Sender<Command>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("SIGINT received");
    }
    let _ = command_tx.send(Command::Exit).await;
}
