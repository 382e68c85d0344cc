//! Periodic tick source for the engine.
//!
//! The engine only reports the interval it wants; this wrapper owns the
//! actual timer and restarts it when the interval changes.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub struct TickClock {
    interval: Interval,
    period: Duration,
}

impl TickClock {
    /// First tick fires one full period from now
    pub fn new(period: Duration) -> Self {
        Self {
            interval: Self::build(period),
            period,
        }
    }

    fn build(period: Duration) -> Interval {
        let mut interval = interval_at(Instant::now() + period, period);
        // A late tick must not be followed by a burst of catch-up moves
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Switch to a new period; the next tick is one new period away.
    /// Does nothing if the period is unchanged.
    pub fn reschedule(&mut self, period: Duration) {
        if period == self.period {
            return;
        }
        self.period = period;
        self.interval = Self::build(period);
    }

    /// Wait for the next tick
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_after_one_period() {
        let start = Instant::now();
        let mut clock = TickClock::new(Duration::from_millis(200));

        clock.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(200));

        clock.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_changes_period() {
        let start = Instant::now();
        let mut clock = TickClock::new(Duration::from_millis(200));
        clock.tick().await;

        clock.reschedule(Duration::from_millis(190));
        assert_eq!(clock.period(), Duration::from_millis(190));

        clock.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(390));
        clock.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(580));
    }
}
