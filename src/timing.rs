use std::time::{Duration, Instant};

/// Runs `f` and returns its result with the wall-clock time it took.
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Operations per second, 0.0 for a zero duration.
pub fn rate(count: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}

pub fn format_duration(d: Duration) -> String {
    if d.as_secs() > 0 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() > 0 {
        format!("{:.2}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.2}µs", d.as_secs_f64() * 1_000_000.0)
    }
}

pub fn format_rate(count: u64, d: Duration) -> String {
    let ops = rate(count, d);
    if ops >= 1_000_000.0 {
        format!("{:.2}M ops/s", ops / 1_000_000.0)
    } else if ops >= 1_000.0 {
        format!("{:.2}K ops/s", ops / 1_000.0)
    } else {
        format!("{:.2} ops/s", ops)
    }
}

/// Counts documents against wall-clock time, overall and since the last mark.
#[derive(Debug, Clone)]
pub struct Meter {
    started: Instant,
    last_mark: Instant,
    total: u64,
    interval: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalSample {
    pub total_docs: u64,
    pub total_elapsed: Duration,
    pub interval_docs: u64,
    pub interval_elapsed: Duration,
}

impl IntervalSample {
    pub fn total_rate(&self) -> f64 {
        rate(self.total_docs, self.total_elapsed)
    }

    pub fn interval_rate(&self) -> f64 {
        rate(self.interval_docs, self.interval_elapsed)
    }
}

impl Meter {
    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    pub fn start_at(now: Instant) -> Self {
        Self {
            started: now,
            last_mark: now,
            total: 0,
            interval: 0,
        }
    }

    pub fn record(&mut self, count: u64) {
        self.total += count;
        self.interval += count;
    }

    pub fn mark(&mut self) -> IntervalSample {
        self.mark_at(Instant::now())
    }

    /// Closes the current interval at `now` and starts a new one.
    pub fn mark_at(&mut self, now: Instant) -> IntervalSample {
        let sample = IntervalSample {
            total_docs: self.total,
            total_elapsed: now.saturating_duration_since(self.started),
            interval_docs: self.interval,
            interval_elapsed: now.saturating_duration_since(self.last_mark),
        };
        self.last_mark = now;
        self.interval = 0;
        sample
    }
}
