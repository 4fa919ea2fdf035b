//! Advisory progress reporting and timing.
//!
//! Nothing here influences results; reporters only observe how far a run has got.

use std::time::{Duration, Instant};

/// Receives progress from a long running operation.
pub trait Progress {
    /// Called once before work begins with the number of units to process.
    fn start(&mut self, total: u64);

    /// Called with the number of units processed so far.
    fn update(&mut self, done: u64);

    /// Called once when work ends, returning the time taken.
    fn stop(&mut self) -> Duration;
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&mut self, _total: u64) {}

    fn update(&mut self, _done: u64) {}

    fn stop(&mut self) -> Duration {
        Duration::ZERO
    }
}

/// Logs progress at `info` level every `step` percent.
#[derive(Debug)]
pub struct LogProgress {
    name: &'static str,
    step: u64,
    total: u64,
    next_percent: u64,
    started: Option<Instant>,
}

impl LogProgress {
    pub fn new(name: &'static str) -> Self {
        Self::with_step(name, 10)
    }

    /// `step` is clamped to 1..=100.
    pub fn with_step(name: &'static str, step: u64) -> Self {
        Self {
            name,
            step: step.clamp(1, 100),
            total: 0,
            next_percent: 0,
            started: None,
        }
    }
}

impl Progress for LogProgress {
    fn start(&mut self, total: u64) {
        self.total = total;
        self.next_percent = self.step;
        self.started = Some(Instant::now());
        log::info!("{}: processing {} cells", self.name, total);
    }

    fn update(&mut self, done: u64) {
        if self.total == 0 || self.next_percent > 100 {
            return;
        }
        let percent = done.saturating_mul(100) / self.total;
        if percent >= self.next_percent {
            log::info!("{}: {}%", self.name, percent);
            self.next_percent = (percent / self.step + 1) * self.step;
        }
    }

    fn stop(&mut self) -> Duration {
        let elapsed = self.started.take().map(|t| t.elapsed()).unwrap_or_default();
        log::info!("{}: succeeded in {:.2?}", self.name, elapsed);
        elapsed
    }
}

/// RAII timer that logs elapsed time at `debug` level on drop.
pub struct Timed {
    name: &'static str,
    start: Instant,
}

impl Timed {
    pub fn new(name: &'static str) -> Self {
        log::trace!("{}...", name);
        Self { name, start: Instant::now() }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        log::debug!("{}: {:.3?}", self.name, self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_steps() {
        let mut p = LogProgress::with_step("test", 25);
        p.start(200);
        p.update(10);
        assert_eq!(p.next_percent, 25);
        p.update(50);
        assert_eq!(p.next_percent, 50);
        // jumping past several steps reports once
        p.update(190);
        assert_eq!(p.next_percent, 100);
        p.update(200);
        assert_eq!(p.next_percent, 125);
        p.update(200);
        p.stop();
    }

    #[test]
    fn test_zero_total() {
        let mut p = LogProgress::new("empty");
        p.start(0);
        p.update(0);
        p.stop();
        // a second stop has nothing left to time
        assert_eq!(p.stop(), Duration::ZERO);
    }
}
