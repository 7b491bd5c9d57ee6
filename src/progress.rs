use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::{Duration, Instant};

/// Simulated progress never passes this until the request resolves.
pub const PROGRESS_CEILING: f64 = 90.0;

pub const DEFAULT_TIME_CONSTANT: Duration = Duration::from_secs(3);

const TICK: Duration = Duration::from_millis(100);

/// Percentage shown after `elapsed`, easing towards the ceiling. Purely
/// cosmetic: it knows nothing about the real request.
pub fn simulated_progress(elapsed: Duration, time_constant: Duration) -> f64 {
    if time_constant.is_zero() {
        return PROGRESS_CEILING;
    }
    let t = elapsed.as_secs_f64() / time_constant.as_secs_f64();
    PROGRESS_CEILING * (1.0 - (-t).exp())
}

/// Drives a progress bar while `work` runs, then completes it.
pub async fn with_progress<F: Future>(message: &str, work: F) -> F::Output {
    let pb = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {bar:30.cyan/blue} {pos:>3}% {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());

    let started = Instant::now();
    let mut ticker = tokio::time::interval(TICK);
    tokio::pin!(work);

    let output = loop {
        tokio::select! {
            output = &mut work => break output,
            _ = ticker.tick() => {
                let pct = simulated_progress(started.elapsed(), DEFAULT_TIME_CONSTANT);
                pb.set_position(pct as u64);
            }
        }
    };

    pb.set_position(100);
    pb.finish_and_clear();
    output
}
