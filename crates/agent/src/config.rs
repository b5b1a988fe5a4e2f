//! Agent configuration loaded from environment variables.
//!
//! All values have development defaults matching a stock dd-wrt
//! repeater on the local network. Override via environment variables
//! (or a `.env` file picked up by `dotenvy`).
//!
//! | Variable                  | Default                                        |
//! |---------------------------|------------------------------------------------|
//! | `LINKWATCH_URL`           | `http://192.168.3.253`                         |
//! | `LINKWATCH_TIMEOUT_SECS`  | `3`                                            |
//! | `LINKWATCH_PATTERN`       | dd-wrt `setWirelessTable(...)` capture regex   |
//! | `LINKWATCH_TABLE`         | `-2:error, -1:nocon, 0:low, 16:medium, 35:high`|
//! | `LINKWATCH_KEY`           | `Q`                                            |
//! | `LINKWATCH_TOOLTIP`       | `SNR: {SNR} / Q: {Q}%`                         |
//! | `LINKWATCH_TOOLTIP_ERROR` | `ERR: {desc}`                                  |
//! | `LINKWATCH_NO_WIFI`       | `no wifi connection`                           |
//! | `LINKWATCH_INTERVAL_SECS` | `10`                                           |
//! | `LINKWATCH_ICON_DIR`      | `icon/128`                                     |
//! | `LINKWATCH_REPLAY_FILE`   | unset (poll the live device)                   |

use std::path::PathBuf;
use std::time::Duration;

/// dd-wrt r22000++ (king-kong) wireless table line. Newer firmware
/// inserts a radio name and an info blob after the interface field, so
/// the pattern stays configuration rather than code.
pub const DEFAULT_PATTERN: &str = r"setWirelessTable\('(?P<MAC>.+)','(?P<if>.+)','(?P<uptime>.+)','(?P<TXrate>.+)','(?P<RXrate>.+)','(?P<signal>.+)','(?P<noise>.+)','(?P<SNR>\d+)','(?P<Q10>\d+)'\);";

/// Everything the agent needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Device status page URL.
    pub url: String,
    /// Whole-request HTTP timeout.
    pub timeout: Duration,
    /// Named-capture extraction regex (device-firmware specific).
    pub pattern: String,
    /// Threshold table spec, `level:label` comma list.
    pub table: String,
    /// Reading field driving the threshold lookup (`Q`, `Q10`, `SNR`, `SN`).
    pub key: String,
    /// Success tooltip template.
    pub tooltip: String,
    /// Failure tooltip template; sees a single `desc` field.
    pub tooltip_error: String,
    /// Description shown when no line matches the pattern.
    pub no_wifi: String,
    /// Poll interval.
    pub interval: Duration,
    /// Directory holding `<label>.png` icon files.
    pub icon_dir: PathBuf,
    /// When set, cycle through samples from this JSON file instead of
    /// polling the device (diagnostic mode).
    pub replay_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables with defaults.
    ///
    /// Malformed numeric variables abort startup: a typo'd timeout
    /// silently becoming the default is worse than refusing to start.
    pub fn from_env() -> Self {
        let url = std::env::var("LINKWATCH_URL").unwrap_or_else(|_| "http://192.168.3.253".into());

        let timeout_secs: u64 = std::env::var("LINKWATCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("LINKWATCH_TIMEOUT_SECS must be a valid u64");

        let pattern =
            std::env::var("LINKWATCH_PATTERN").unwrap_or_else(|_| DEFAULT_PATTERN.into());

        let table = std::env::var("LINKWATCH_TABLE")
            .unwrap_or_else(|_| "-2:error, -1:nocon, 0:low, 16:medium, 35:high".into());

        let key = std::env::var("LINKWATCH_KEY").unwrap_or_else(|_| "Q".into());

        let tooltip =
            std::env::var("LINKWATCH_TOOLTIP").unwrap_or_else(|_| "SNR: {SNR} / Q: {Q}%".into());

        let tooltip_error =
            std::env::var("LINKWATCH_TOOLTIP_ERROR").unwrap_or_else(|_| "ERR: {desc}".into());

        let no_wifi =
            std::env::var("LINKWATCH_NO_WIFI").unwrap_or_else(|_| "no wifi connection".into());

        let interval_secs: u64 = std::env::var("LINKWATCH_INTERVAL_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("LINKWATCH_INTERVAL_SECS must be a valid u64");

        let icon_dir: PathBuf = std::env::var("LINKWATCH_ICON_DIR")
            .unwrap_or_else(|_| "icon/128".into())
            .into();

        let replay_file = std::env::var("LINKWATCH_REPLAY_FILE").ok().map(PathBuf::from);

        Self {
            url,
            timeout: Duration::from_secs(timeout_secs),
            pattern,
            table,
            key,
            tooltip,
            tooltip_error,
            no_wifi,
            interval: Duration::from_secs(interval_secs),
            icon_dir,
            replay_file,
        }
    }
}
