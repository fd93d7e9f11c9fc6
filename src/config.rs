use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Medicare Nepal";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";
/// Symptom analyses allowed per client per hour.
pub const DEFAULT_ANALYSIS_PER_HOUR: u32 = 20;
/// Requests of any kind allowed per client per 15-minute window.
pub const DEFAULT_REQUESTS_PER_WINDOW: u32 = 100;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,medicare_lib=debug"
}

/// Get the application data directory
/// ~/MedicareNepal/ on all platforms. Falls back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("MedicareNepal")
}

/// Default location for reference-table overrides.
pub fn reference_dir() -> PathBuf {
    app_data_dir().join("reference")
}

/// Runtime settings for the HTTP service, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub client_url: String,
    pub reference_dir: PathBuf,
    pub analysis_per_hour: u32,
    pub requests_per_window: u32,
    /// Behind a reverse proxy: key rate limits on `X-Forwarded-For`.
    pub trust_proxy: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            client_url: DEFAULT_CLIENT_URL.to_string(),
            reference_dir: reference_dir(),
            analysis_per_hour: DEFAULT_ANALYSIS_PER_HOUR,
            requests_per_window: DEFAULT_REQUESTS_PER_WINDOW,
            trust_proxy: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind: parse_or("MEDICARE_BIND", lookup("MEDICARE_BIND"), defaults.bind),
            client_url: lookup("MEDICARE_CLIENT_URL").unwrap_or(defaults.client_url),
            reference_dir: lookup("MEDICARE_REFERENCE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.reference_dir),
            analysis_per_hour: parse_or(
                "MEDICARE_ANALYSIS_PER_HOUR",
                lookup("MEDICARE_ANALYSIS_PER_HOUR"),
                defaults.analysis_per_hour,
            ),
            requests_per_window: parse_or(
                "MEDICARE_REQUESTS_PER_WINDOW",
                lookup("MEDICARE_REQUESTS_PER_WINDOW"),
                defaults.requests_per_window,
            ),
            trust_proxy: parse_or(
                "MEDICARE_TRUST_PROXY",
                lookup("MEDICARE_TRUST_PROXY"),
                defaults.trust_proxy,
            ),
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %value, "Ignoring unparseable setting");
            default
        }),
    }
}
