use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Stopwatch for one answer: started when the question is shown, stopped
/// when the answer line arrives.
#[derive(Debug, Clone, Default)]
pub struct ResponseTimer {
    status: TimerStatus,
    running_anchor: Option<Instant>,
    elapsed: Duration,
}

impl ResponseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn start(&mut self, now: Instant) {
        *self = Self {
            status: TimerStatus::Running,
            running_anchor: Some(now),
            elapsed: Duration::ZERO,
        };
    }

    /// Freeze the measurement. Stopping an idle or stopped timer changes nothing.
    pub fn stop(&mut self, now: Instant) -> Duration {
        if let (TimerStatus::Running, Some(anchor)) = (self.status, self.running_anchor) {
            self.elapsed = now.saturating_duration_since(anchor);
            self.status = TimerStatus::Stopped;
            self.running_anchor = None;
        }
        self.elapsed
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.status, self.running_anchor) {
            (TimerStatus::Running, Some(anchor)) => now.saturating_duration_since(anchor),
            _ => self.elapsed,
        }
    }

    /// Elapsed seconds rounded to hundredths, as stored in the trial log.
    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        (self.elapsed(now).as_secs_f64() * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_between_start_and_stop() {
        let t0 = Instant::now();
        let mut timer = ResponseTimer::new();
        assert_eq!(timer.status(), TimerStatus::Idle);

        timer.start(t0);
        assert_eq!(timer.status(), TimerStatus::Running);
        assert_eq!(timer.elapsed(t0 + Duration::from_millis(500)), Duration::from_millis(500));

        let measured = timer.stop(t0 + Duration::from_millis(2341));
        assert_eq!(measured, Duration::from_millis(2341));
        assert_eq!(timer.status(), TimerStatus::Stopped);

        // Frozen after stop.
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(60)), measured);
        assert_eq!(timer.stop(t0 + Duration::from_secs(60)), measured);
        assert_eq!(timer.elapsed_secs(t0), 2.34);
    }

    #[test]
    fn idle_timer_reports_zero() {
        let timer = ResponseTimer::new();
        assert_eq!(timer.elapsed(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn restart_discards_previous_measurement() {
        let t0 = Instant::now();
        let mut timer = ResponseTimer::new();
        timer.start(t0);
        timer.stop(t0 + Duration::from_secs(3));
        timer.start(t0 + Duration::from_secs(10));
        assert_eq!(timer.stop(t0 + Duration::from_secs(11)), Duration::from_secs(1));
    }
}
