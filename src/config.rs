use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::i18n::Lang;
use crate::prefs;

pub const DEFAULT_SOURCE: &str = "data.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: String,
    pub forced_lang: Option<Lang>,
    pub tick: Duration,
    pub http_timeout: Duration,
    pub prefs_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::from_lookup(|name| env::var(name).ok());
        cfg.prefs_path = prefs::prefs_path();
        cfg
    }

    /// Builds a config from an arbitrary variable source. Preferences are not located here.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let source = lookup("SCENARIOS_SOURCE")
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string());
        let forced_lang = lookup("SCENARIOS_LANG").and_then(|val| Lang::parse(&val));
        let tick_ms = lookup("SCENARIOS_TICK_MS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(50)
            .max(10);
        let timeout_secs = lookup("SCENARIOS_HTTP_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(10)
            .max(1);

        Self {
            source,
            forced_lang,
            tick: Duration::from_millis(tick_ms),
            http_timeout: Duration::from_secs(timeout_secs),
            prefs_path: None,
        }
    }

    /// Forced language, then the saved preference, then the system locale.
    pub fn initial_lang(&self, saved: Option<Lang>, locale: Option<&str>) -> Lang {
        self.forced_lang
            .or(saved)
            .unwrap_or_else(|| Lang::from_locale(locale))
    }
}
