use crate::models::{CounterOptions, CounterWindow, NumberFormat, TweenOptions};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{error, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config/live_counter.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stats_url: String,
    pub poll_interval_ms: u64,
    pub animation_duration_ms: u64,
    pub request_timeout_ms: u64,
    pub counters: BTreeMap<String, CounterOptions>,
}

impl Default for Config {
    fn default() -> Self {
        let mut counters = BTreeMap::new();
        counters.insert("dayLookups".to_string(), CounterOptions::with_window(24.0));
        counters.insert("monthLookups".to_string(), CounterOptions::with_window(720.0));

        Self {
            stats_url: "http://127.0.0.1:8080/stats".to_string(),
            poll_interval_ms: 10_000,
            animation_duration_ms: 10_000,
            request_timeout_ms: 5_000,
            counters,
        }
    }
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(1))
    }

    pub fn window(&self, name: &str) -> Option<CounterWindow> {
        self.counters.get(name).map(|options| options.window)
    }

    pub fn tween_options(&self, name: &str) -> TweenOptions {
        let counter = self.counters.get(name);
        TweenOptions {
            duration: self.animation_duration(),
            prefix: counter.and_then(|c| c.prefix.clone()),
            suffix: counter.and_then(|c| c.suffix.clone()),
            format: NumberFormat::default(),
        }
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("STATS_URL").filter(|url| !url.trim().is_empty()) {
            self.stats_url = url.trim().to_string();
        }
        if let Some(raw) = lookup("POLL_INTERVAL_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.poll_interval_ms = ms,
                Err(err) => warn!("ignoring POLL_INTERVAL_MS={raw:?}: {err}"),
            }
        }
        self
    }
}

pub fn resolve_config_path() -> PathBuf {
    if let Ok(path) = env::var("APP_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_CONFIG_PATH)
}

pub async fn load_config(path: &Path) -> Config {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(config) => config,
            Err(err) => {
                error!("failed to parse config file {}: {err}", path.display());
                Config::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(err) => {
            error!("failed to read config file {}: {err}", path.display());
            Config::default()
        }
    }
}

pub async fn load_from_env() -> Config {
    let path = resolve_config_path();
    load_config(&path).await.with_overrides(|key| env::var(key).ok())
}
