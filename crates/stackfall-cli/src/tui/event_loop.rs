use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Tracks the tick schedule and returns the next event via `next()`.
/// Rendering happens whenever a tick or a terminal event has changed state.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with ticks disabled.
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval without moving the next deadline's starting point.
    ///
    /// Pass `None` to disable tick events.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    /// Sets the tick interval and counts the next tick from now.
    pub(super) fn restart_tick(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    /// Returns the next event.
    ///
    /// Blocks until the tick deadline is reached or a crossterm event occurs.
    /// Without a tick interval, only waits for crossterm events.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_timeout_without_ticks() {
        let events = EventLoop::new();
        assert_eq!(events.compute_timeout(Instant::now()), None);
    }

    #[test]
    fn test_restart_pushes_deadline_back() {
        let mut events = EventLoop::new();
        let interval = Duration::from_secs(60);
        events.set_tick_interval(Some(interval));
        events.last_tick -= Duration::from_secs(30);
        let now = Instant::now();
        assert!(events.compute_timeout(now).unwrap() <= Duration::from_secs(30));

        events.restart_tick(Some(interval));
        assert!(events.compute_timeout(now).unwrap() > Duration::from_secs(30));
    }

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        assert!(events.next().unwrap().is_render());
    }
}
