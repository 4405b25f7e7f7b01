use crate::animator::Animator;
use crate::config::Config;
use crate::display::DisplaySink;
use crate::errors::AppError;
use crate::estimator::start_value;
use crate::models::{CounterUpdate, CycleReport};
use crate::source::SnapshotSource;
use crate::state::PollerState;
use chrono::Local;
use std::future::Future;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub struct Poller<S: SnapshotSource, D: DisplaySink> {
    source: S,
    animator: Arc<Animator<D>>,
    state: PollerState,
    config: Config,
}

impl<S: SnapshotSource, D: DisplaySink> Poller<S, D> {
    pub fn new(source: S, animator: Arc<Animator<D>>, config: Config) -> Self {
        Self {
            source,
            animator,
            state: PollerState::new(),
            config,
        }
    }

    pub fn state(&self) -> &PollerState {
        &self.state
    }

    pub fn animator(&self) -> &Arc<Animator<D>> {
        &self.animator
    }

    pub async fn poll_once(&mut self) -> Result<CycleReport, AppError> {
        let snapshot = self.source.fetch().await?;
        let interval_secs = self.config.poll_interval().as_secs_f64();

        let mut updates = Vec::with_capacity(snapshot.len());
        for (name, to) in snapshot.iter() {
            let previous = self.state.previous(name);
            let window = self.config.window(name);
            let start = start_value(previous, window, to, interval_secs);
            let animated = self
                .animator
                .animate(name, start, to as f64, &self.config.tween_options(name))
                .is_ok();

            debug!(counter = name, ?previous, start, end = to, "counter updated");
            updates.push(CounterUpdate {
                name: name.to_string(),
                start,
                end: to,
                extrapolated: previous.is_none() && window.is_some(),
                animated,
            });
        }

        self.state.retain(snapshot);
        Ok(CycleReport {
            fetched_at: Local::now(),
            updates,
        })
    }

    pub async fn run<F>(mut self, shutdown: F) -> PollerState
    where
        F: Future<Output = ()>,
    {
        let interval = self.config.poll_interval();
        let mut shutdown = std::pin::pin!(shutdown);
        info!(interval_ms = interval.as_millis() as u64, "poller started");

        // reschedule after every cycle, failed or not
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                outcome = self.poll_once() => match outcome {
                    Ok(report) => info!(
                        counters = report.updates.len(),
                        at = %report.fetched_at.format("%H:%M:%S"),
                        "poll cycle complete"
                    ),
                    Err(err) => warn!("{err}; retrying in {}ms", interval.as_millis()),
                },
            }

            tokio::select! {
                _ = &mut shutdown => break,
                _ = sleep(interval) => {}
            }
        }

        self.animator.cancel_all();
        info!("poller stopped");
        self.state
    }
}
