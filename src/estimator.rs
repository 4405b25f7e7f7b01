use crate::models::CounterWindow;

pub fn extrapolate_start(hours: f64, to: u64, poll_interval_secs: f64) -> f64 {
    let to = to as f64;
    if hours <= 0.0 || !hours.is_finite() || to == 0.0 {
        return to;
    }

    let rate = to / hours / 3600.0;
    to - rate * poll_interval_secs
}

pub fn start_value(
    previous: Option<u64>,
    window: Option<CounterWindow>,
    to: u64,
    poll_interval_secs: f64,
) -> f64 {
    match (previous, window) {
        (Some(previous), _) => previous as f64,
        (None, Some(window)) => extrapolate_start(window.hours, to, poll_interval_secs),
        (None, None) => to as f64,
    }
}
