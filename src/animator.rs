use crate::display::DisplaySink;
use crate::errors::AppError;
use crate::format::format_value;
use crate::models::TweenOptions;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error};

pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Slot {
    fn supersede(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation
    }
}

type SharedSlot = Arc<Mutex<Slot>>;

#[derive(Debug, Clone)]
struct Tween {
    key: String,
    start: f64,
    end: f64,
    options: TweenOptions,
}

impl Tween {
    fn value_at(&self, progress: f64) -> f64 {
        if progress >= 1.0 {
            self.end
        } else {
            self.start + (self.end - self.start) * progress
        }
    }

    fn text(&self, value: f64) -> String {
        format_value(
            value,
            &self.options.format,
            self.options.prefix.as_deref(),
            self.options.suffix.as_deref(),
        )
    }
}

pub struct Animator<D: DisplaySink> {
    display: Arc<D>,
    slots: Mutex<HashMap<String, SharedSlot>>,
    frame: Duration,
}

impl<D: DisplaySink> Animator<D> {
    pub fn new(display: Arc<D>) -> Self {
        Self::with_frame_interval(display, FRAME_INTERVAL)
    }

    pub fn with_frame_interval(display: Arc<D>, frame: Duration) -> Self {
        Self {
            display,
            slots: Mutex::new(HashMap::new()),
            frame: frame.max(Duration::from_millis(1)),
        }
    }

    pub fn display(&self) -> &Arc<D> {
        &self.display
    }

    pub fn animate(
        &self,
        key: &str,
        start: f64,
        end: f64,
        options: &TweenOptions,
    ) -> Result<(), AppError> {
        let slot = self.slot(key);
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = guard.supersede();

        // the element keeps whatever text it last showed
        if !start.is_finite() || !end.is_finite() {
            let err = AppError::animation(format!("`{key}` from {start} to {end}"));
            error!(counter = key, "{err}");
            return Err(err);
        }

        let tween = Tween {
            key: key.to_string(),
            start,
            end,
            options: options.clone(),
        };

        if start == end || options.duration.is_zero() {
            self.display.render(key, &tween.text(end));
            return Ok(());
        }

        debug!(
            counter = key,
            start,
            end,
            duration_ms = options.duration.as_millis() as u64,
            "tween started"
        );
        guard.handle = Some(tokio::spawn(run_tween(
            Arc::clone(&self.display),
            Arc::clone(&slot),
            generation,
            tween,
            self.frame,
        )));
        Ok(())
    }

    pub fn is_animating(&self, key: &str) -> bool {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).is_some_and(|slot| {
            let slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
            slot.handle.as_ref().is_some_and(|handle| !handle.is_finished())
        })
    }

    pub fn cancel_all(&self) {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for slot in slots.values() {
            slot.lock().unwrap_or_else(PoisonError::into_inner).supersede();
        }
    }

    fn slot(&self, key: &str) -> SharedSlot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.to_string()).or_default())
    }
}

impl<D: DisplaySink> Drop for Animator<D> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

async fn run_tween<D: DisplaySink>(
    display: Arc<D>,
    slot: SharedSlot,
    generation: u64,
    tween: Tween,
    frame: Duration,
) {
    let started = Instant::now();
    let duration = tween.options.duration.as_secs_f64();
    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let progress = (started.elapsed().as_secs_f64() / duration).min(1.0);
        let text = tween.text(tween.value_at(progress));

        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        // a superseded tween may still be mid-frame on another worker
        if guard.generation != generation {
            return;
        }
        display.render(&tween.key, &text);
        if progress >= 1.0 {
            guard.handle = None;
            debug!(counter = %tween.key, end = tween.end, "tween finished");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MemoryDisplay;
    use crate::errors::ErrorKind;
    use tokio::time::sleep;

    fn parse(text: &str) -> f64 {
        text.replace(',', "").parse().unwrap()
    }

    fn animator() -> Animator<MemoryDisplay> {
        Animator::new(Arc::new(MemoryDisplay::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn tween_ends_exactly_on_target() {
        let animator = animator();
        animator
            .animate("dayLookups", 0.0, 1000.0, &TweenOptions::default())
            .unwrap();
        assert!(animator.is_animating("dayLookups"));

        sleep(Duration::from_secs(11)).await;

        let display = animator.display();
        let history = display.history("dayLookups");
        assert_eq!(history.first().map(String::as_str), Some("0"));
        assert_eq!(display.current("dayLookups").as_deref(), Some("1,000"));
        assert!(history.len() > 100, "only {} frames", history.len());
        let values: Vec<f64> = history.iter().map(|text| parse(text)).collect();
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(!animator.is_animating("dayLookups"));
    }

    #[tokio::test(start_paused = true)]
    async fn tween_is_linear_in_wall_clock_time() {
        let animator = animator();
        animator
            .animate("monthLookups", 0.0, 1000.0, &TweenOptions::default())
            .unwrap();

        sleep(Duration::from_millis(5_020)).await;

        let halfway = parse(&animator.display().current("monthLookups").unwrap());
        assert!((490.0..=510.0).contains(&halfway), "halfway value {halfway}");
    }

    #[tokio::test(start_paused = true)]
    async fn equal_endpoints_render_immediately() {
        let animator = animator();
        let options = TweenOptions {
            suffix: Some(" lookups".to_string()),
            ..TweenOptions::default()
        };
        animator.animate("dayLookups", 1000.0, 1000.0, &options).unwrap();
        assert_eq!(
            animator.display().current("dayLookups").as_deref(),
            Some("1,000 lookups")
        );
        assert!(!animator.is_animating("dayLookups"));
    }

    #[tokio::test(start_paused = true)]
    async fn newer_tween_supersedes_older_one() {
        let animator = animator();
        let options = TweenOptions::default();
        animator.animate("dayLookups", 0.0, 1000.0, &options).unwrap();
        sleep(Duration::from_secs(3)).await;

        let writes_before = animator.display().history("dayLookups").len();
        animator.animate("dayLookups", 500.0, 600.0, &options).unwrap();
        sleep(Duration::from_secs(20)).await;

        let history = animator.display().history("dayLookups");
        assert_eq!(history.last().map(String::as_str), Some("600"));
        for text in &history[writes_before..] {
            let value = parse(text);
            assert!((500.0..=600.0).contains(&value), "stray write {value}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_endpoints_leave_element_untouched() {
        let animator = animator();
        animator
            .animate("dayLookups", 7.0, 7.0, &TweenOptions::default())
            .unwrap();

        let err = animator
            .animate("dayLookups", f64::NAN, 10.0, &TweenOptions::default())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Animation);
        let err = animator
            .animate("dayLookups", 0.0, f64::INFINITY, &TweenOptions::default())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Animation);

        sleep(Duration::from_secs(1)).await;
        assert_eq!(animator.display().history("dayLookups"), ["7"]);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_tween_freezes_the_running_one() {
        let animator = animator();
        animator
            .animate("dayLookups", 0.0, 1000.0, &TweenOptions::default())
            .unwrap();
        sleep(Duration::from_secs(2)).await;

        let before = animator.display().history("dayLookups");
        assert!(animator
            .animate("dayLookups", f64::NAN, 1050.0, &TweenOptions::default())
            .is_err());
        assert!(!animator.is_animating("dayLookups"));

        sleep(Duration::from_secs(15)).await;
        assert_eq!(animator.display().history("dayLookups"), before);
        assert_ne!(animator.display().current("dayLookups").as_deref(), Some("1,000"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_stops_every_tween() {
        let animator = animator();
        let options = TweenOptions::default();
        animator.animate("dayLookups", 0.0, 1000.0, &options).unwrap();
        animator.animate("monthLookups", 0.0, 30000.0, &options).unwrap();
        sleep(Duration::from_secs(1)).await;

        animator.cancel_all();
        let day = animator.display().history("dayLookups").len();
        let month = animator.display().history("monthLookups").len();
        sleep(Duration::from_secs(15)).await;

        assert_eq!(animator.display().history("dayLookups").len(), day);
        assert_eq!(animator.display().history("monthLookups").len(), month);
    }
}
