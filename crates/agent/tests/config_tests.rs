//! Integration test for environment-variable configuration.
//!
//! Environment mutation is process-global, so defaults and overrides
//! are exercised in a single test body rather than racing across test
//! threads.

use std::time::Duration;

use linkwatch_agent::config::Config;

const VARS: &[&str] = &[
    "LINKWATCH_URL",
    "LINKWATCH_TIMEOUT_SECS",
    "LINKWATCH_PATTERN",
    "LINKWATCH_TABLE",
    "LINKWATCH_KEY",
    "LINKWATCH_TOOLTIP",
    "LINKWATCH_TOOLTIP_ERROR",
    "LINKWATCH_NO_WIFI",
    "LINKWATCH_INTERVAL_SECS",
    "LINKWATCH_ICON_DIR",
    "LINKWATCH_REPLAY_FILE",
];

#[test]
fn defaults_then_overrides() {
    for var in VARS {
        std::env::remove_var(var);
    }

    // Defaults: the stock dd-wrt repeater setup.
    let config = Config::from_env();
    assert_eq!(config.url, "http://192.168.3.253");
    assert_eq!(config.timeout, Duration::from_secs(3));
    assert_eq!(config.interval, Duration::from_secs(10));
    assert_eq!(config.key, "Q");
    assert_eq!(config.table, "-2:error, -1:nocon, 0:low, 16:medium, 35:high");
    assert_eq!(config.tooltip, "SNR: {SNR} / Q: {Q}%");
    assert_eq!(config.tooltip_error, "ERR: {desc}");
    assert_eq!(config.no_wifi, "no wifi connection");
    assert!(config.pattern.contains("setWirelessTable"));
    assert_eq!(config.replay_file, None);

    // Overrides apply.
    std::env::set_var("LINKWATCH_URL", "http://10.0.0.1");
    std::env::set_var("LINKWATCH_TIMEOUT_SECS", "7");
    std::env::set_var("LINKWATCH_INTERVAL_SECS", "30");
    std::env::set_var("LINKWATCH_KEY", "SN");
    std::env::set_var("LINKWATCH_TABLE", "-2:error, -1:nocon, 0:low, 10:medium, 20:high");
    std::env::set_var("LINKWATCH_REPLAY_FILE", "/tmp/replay.json");

    let config = Config::from_env();
    assert_eq!(config.url, "http://10.0.0.1");
    assert_eq!(config.timeout, Duration::from_secs(7));
    assert_eq!(config.interval, Duration::from_secs(30));
    assert_eq!(config.key, "SN");
    assert_eq!(config.table, "-2:error, -1:nocon, 0:low, 10:medium, 20:high");
    assert_eq!(
        config.replay_file.as_deref(),
        Some(std::path::Path::new("/tmp/replay.json"))
    );

    for var in VARS {
        std::env::remove_var(var);
    }
}
