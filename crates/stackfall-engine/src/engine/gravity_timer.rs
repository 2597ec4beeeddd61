use std::time::Duration;

use super::GameStats;

/// Gravity schedule published by the game for an external clock to follow.
///
/// The engine never sleeps or spawns timers itself. Whoever drives the game
/// polls [`GravityTimer::interval`] and calls `Game::tick` whenever that much
/// time has elapsed since the last tick or since the last restart.
///
/// Every restart bumps [`GravityTimer::generation`], so a driver that caches
/// its deadline can tell that it must re-arm from "now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityTimer {
    period: Duration,
    running: bool,
    generation: u64,
}

impl Default for GravityTimer {
    fn default() -> Self {
        Self::new(GameStats::MIN_LEVEL)
    }
}

impl GravityTimer {
    const BASE_PERIOD: Duration = Duration::from_millis(1000);
    const PERIOD_STEP: Duration = Duration::from_millis(50);

    #[must_use]
    pub fn new(level: usize) -> Self {
        Self {
            period: Self::period_for_level(level),
            running: false,
            generation: 0,
        }
    }

    /// Gravity period at `level`: 1000ms, minus 50ms for every level above 1.
    ///
    /// ```
    /// use std::time::Duration;
    /// use stackfall_engine::GravityTimer;
    ///
    /// assert_eq!(GravityTimer::period_for_level(1), Duration::from_millis(1000));
    /// assert_eq!(GravityTimer::period_for_level(20), Duration::from_millis(50));
    /// ```
    #[must_use]
    pub fn period_for_level(level: usize) -> Duration {
        let steps = level.clamp(GameStats::MIN_LEVEL, GameStats::MAX_LEVEL) - 1;
        // `steps` is at most 19.
        Self::BASE_PERIOD - Self::PERIOD_STEP * u32::try_from(steps).unwrap_or(0)
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time until the next tick, or `None` while stopped.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.running.then_some(self.period)
    }

    /// Changes the period. Takes effect on the next scheduled tick.
    pub fn set_level(&mut self, level: usize) {
        self.period = Self::period_for_level(level);
    }

    /// Starts the timer and re-arms it from the current instant.
    pub fn restart(&mut self) {
        self.running = true;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}
