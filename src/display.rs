use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

const BOARD_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const SPINNER_TICK: Duration = Duration::from_millis(120);

pub trait DisplaySink: Send + Sync + 'static {
    fn render(&self, key: &str, text: &str);
}

#[derive(Debug, Default)]
pub struct MemoryDisplay {
    writes: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self, key: &str) -> Option<String> {
        let writes = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        writes.get(key).and_then(|history| history.last().cloned())
    }

    pub fn history(&self, key: &str) -> Vec<String> {
        let writes = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        writes.get(key).cloned().unwrap_or_default()
    }
}

impl DisplaySink for MemoryDisplay {
    fn render(&self, key: &str, text: &str) {
        let mut writes = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        writes
            .entry(key.to_string())
            .or_default()
            .push(text.to_string());
    }
}

#[derive(Debug)]
pub struct TerminalDisplay {
    bar: ProgressBar,
    board: Mutex<Vec<(String, String)>>,
}

impl TerminalDisplay {
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template(BOARD_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(SPINNER_TICK);
        Self::with_bar(bar, keys)
    }

    pub fn with_bar<I, K>(bar: ProgressBar, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let board: Vec<(String, String)> = keys
            .into_iter()
            .map(|key| (key.into(), "-".to_string()))
            .collect();
        bar.set_message(Self::line(&board));
        Self {
            bar,
            board: Mutex::new(board),
        }
    }

    pub fn finish(&self) {
        self.bar.finish();
    }

    fn line(board: &[(String, String)]) -> String {
        board
            .iter()
            .map(|(key, text)| format!("{key} {text}"))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl DisplaySink for TerminalDisplay {
    fn render(&self, key: &str, text: &str) {
        let mut board = self.board.lock().unwrap_or_else(PoisonError::into_inner);
        match board.iter_mut().find(|(name, _)| name == key) {
            Some(slot) => slot.1 = text.to_string(),
            None => board.push((key.to_string(), text.to_string())),
        }
        self.bar.set_message(Self::line(&board));
    }
}
