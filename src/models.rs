use chrono::{DateTime, Local};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    counts: Vec<(String, u64)>,
}

impl CounterSnapshot {
    pub fn get(&self, name: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for CounterSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut snapshot = Self::default();
        for (name, count) in iter {
            let name = name.into();
            match snapshot.counts.iter_mut().find(|(key, _)| *key == name) {
                Some(slot) => slot.1 = count,
                None => snapshot.counts.push((name, count)),
            }
        }
        snapshot
    }
}

impl<'de> Deserialize<'de> for CounterSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let mut counts = Vec::with_capacity(map.len());
        for (name, value) in map {
            let count = value.as_u64().ok_or_else(|| {
                D::Error::custom(format!(
                    "counter `{name}` is not a non-negative integer: {value}"
                ))
            })?;
            counts.push((name, count));
        }
        Ok(Self { counts })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CounterWindow {
    pub hours: f64,
}

impl CounterWindow {
    pub const fn hours(hours: f64) -> Self {
        Self { hours }
    }
}

// empty prefix/suffix strings are treated as absent
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CounterOptions {
    #[serde(flatten)]
    pub window: CounterWindow,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
}

impl CounterOptions {
    pub fn with_window(hours: f64) -> Self {
        Self {
            window: CounterWindow::hours(hours),
            prefix: None,
            suffix: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pub separator: String,
    pub decimal: String,
    pub decimals: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            decimal: ".".to_string(),
            decimals: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TweenOptions {
    pub duration: Duration,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub format: NumberFormat,
}

impl Default for TweenOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(10),
            prefix: None,
            suffix: None,
            format: NumberFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterUpdate {
    pub name: String,
    pub start: f64,
    pub end: u64,
    pub extrapolated: bool,
    pub animated: bool,
}

#[derive(Debug, Clone)]
pub struct CycleReport {
    pub fetched_at: DateTime<Local>,
    pub updates: Vec<CounterUpdate>,
}
