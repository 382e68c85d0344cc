use std::time::{Duration, Instant};

/// Per-session bookkeeping shown in the header. Nothing here is persisted.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub last_score: Option<u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            last_score: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Shift the start so time spent paused is not counted
    pub fn on_resume(&mut self) {
        let now = Instant::now();
        self.start_time = now.checked_sub(self.elapsed_time).unwrap_or(now);
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.last_score = Some(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_game_over_tracking() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.last_score, None);

        metrics.on_game_over(30);
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.last_score, Some(30));

        metrics.on_game_over(10);
        assert_eq!(metrics.games_played, 2);
        assert_eq!(metrics.last_score, Some(10));
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }

    #[test]
    fn test_resume_keeps_elapsed_time() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(30);

        metrics.on_resume();
        metrics.update();

        assert!(metrics.elapsed_time >= Duration::from_secs(30));
        assert!(metrics.elapsed_time < Duration::from_secs(31));
    }
}
