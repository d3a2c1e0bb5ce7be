use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::core::request::StalePolicy;

/// Origin of the analytics service in the reference deployment.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub tui: TuiConfig,
    pub viz: VizConfig,
    pub data: DataConfig,
}

/// Remote analytics service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Service origin. Empty means the default origin.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Handling of responses that resolve after a newer submission.
    pub stale_responses: StalePolicy,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Scatter document hand-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Open each newly mounted document in the system browser.
    pub auto_open: bool,
    /// Where the host page is written. Defaults to `<data_dir>/viz`.
    pub output_dir: Option<PathBuf>,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            stale_responses: StalePolicy::LastResolved,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            auto_open: true,
            output_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then `~/.config/gasify/config.toml`,
    /// then `GASIFY_*` environment variables (`__` separates sections, e.g.
    /// `GASIFY_API__BASE_URL`).
    ///
    /// Nothing is logged here since logging is configured from the result.
    /// Call [`LoadedConfig::report`] once the subscriber is installed.
    pub fn load() -> LoadedConfig {
        Self::load_from(&Self::config_path())
    }

    /// Load with an explicit file layer. Falls back to `Default` if the
    /// merged configuration does not parse, keeping the error for reporting.
    pub fn load_from(config_path: &Path) -> LoadedConfig {
        let (config, error) = match Self::figment(config_path).extract() {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        };
        LoadedConfig {
            config,
            source: config_path.to_path_buf(),
            error,
        }
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("GASIFY_").split("__"))
    }

    /// Service origin with the empty-string convention resolved.
    pub fn base_url(&self) -> &str {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms.max(10))
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("gasify"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    /// Directory holding the scatter host page.
    pub fn viz_dir(&self) -> PathBuf {
        self.viz
            .output_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join("viz"))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("gasify").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

/// Result of [`AppConfig::load`].
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// File layer that was read.
    pub source: PathBuf,
    /// Why the layers were discarded, if they were.
    pub error: Option<figment::Error>,
}

impl LoadedConfig {
    /// Log how loading went. Must run after logging is initialised.
    pub fn report(&self) {
        match &self.error {
            None => log::info!("Loaded config (file: {})", self.source.display()),
            Some(e) => log::warn!(
                "Failed to load config from {}: {e}; using defaults",
                self.source.display()
            ),
        }
    }
}
