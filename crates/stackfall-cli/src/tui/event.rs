use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Gravity step (based on `tick_interval`).
    Tick,
    /// Screen redraw after a state change.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
