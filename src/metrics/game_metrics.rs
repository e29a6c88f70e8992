use std::time::{Duration, Instant};

/// Session counters shown in the header: time played, games finished and the
/// best score so far. Fed by the mode layer on game start and game over.
#[derive(Debug, Clone)]
pub struct GameMetrics {
    started_at: Instant,
    games_played: u32,
    high_score: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            games_played: 0,
            high_score: 0,
        }
    }

    /// Wall-clock time since the current game started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Restarts the per-game timer.
    pub fn on_game_start(&mut self) {
        self.started_at = Instant::now();
    }

    /// Folds a finished game into the session tallies.
    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    /// The current game time as mm:ss.
    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn format_duration(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}
