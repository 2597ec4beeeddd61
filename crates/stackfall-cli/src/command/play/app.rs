use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use stackfall_engine::{Game, GameState};

use crate::{
    tui::{App, Tui},
    view::widgets::{GameDisplay, KeyBinding, KeyBindingDisplay},
};

const PLAYING_KEYS: &[KeyBinding] = &[
    (&["←", "→", "↓"], "Move"),
    (&["↑", "Z", "X"], "Rotate"),
    (&["Space"], "Drop"),
    (&["C"], "Hold"),
    (&["P"], "Pause"),
    (&["Q"], "Quit"),
];

const PAUSED_KEYS: &[KeyBinding] = &[
    (&["P"], "Resume"),
    (&["N"], "New game"),
    (&["S", "R", "D"], "Shadow/Rotation/Drop"),
    (&["Q"], "Quit"),
];

const STOPPED_KEYS: &[KeyBinding] = &[
    (&["N"], "New game"),
    (&["+", "-"], "Start level"),
    (&["S", "R", "D"], "Shadow/Rotation/Drop"),
    (&["Q"], "Quit"),
];

/// Interactive game driven by the keyboard and the engine's gravity schedule.
#[derive(Debug)]
pub(crate) struct PlayApp {
    game: Game,
    has_played: bool,
    gravity_generation: u64,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(game: Game) -> Self {
        Self {
            gravity_generation: game.gravity().generation(),
            game,
            has_played: false,
            is_exiting: false,
        }
    }

    pub(crate) fn game(&self) -> &Game {
        &self.game
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        // Any of these held down inverts rotation and drop behavior.
        let modified = key
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::CONTROL | KeyModifiers::ALT);
        let is_off = self.game.state().is_off();

        match key.code {
            KeyCode::Left => self.game.move_left(),
            KeyCode::Right => self.game.move_right(),
            KeyCode::Down => self.game.soft_drop(),
            KeyCode::Up => self.game.rotate(modified),
            KeyCode::Char('z' | 'Z') => self.game.rotate(true),
            KeyCode::Char('x' | 'X') => self.game.rotate(false),
            KeyCode::Char(' ') | KeyCode::Enter => self.game.hard_drop(modified),
            KeyCode::Char('c' | 'C') => self.game.hold(),
            KeyCode::Char('p' | 'P') => self.game.pause(),
            KeyCode::Char('n' | 'N') => {
                self.game.start();
                self.has_played = true;
            }
            KeyCode::Char('s' | 'S') => {
                self.game.set_display_shadow(!self.game.display_shadow());
            }
            KeyCode::Char('r' | 'R') => {
                self.game.set_rotate_clockwise(!self.game.rotate_clockwise());
            }
            KeyCode::Char('d' | 'D') => {
                self.game.set_move_after_drop(!self.game.move_after_drop());
            }
            KeyCode::Char('+' | '=') if is_off => {
                self.set_initial_level(self.game.initial_level() + 1);
            }
            KeyCode::Char('-') if is_off => {
                self.set_initial_level(self.game.initial_level().saturating_sub(1));
            }
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn set_initial_level(&mut self, level: usize) {
        if let Err(err) = self.game.set_initial_level(level) {
            log::debug!("ignoring level change: {err}");
        }
    }

    /// Re-arms the tick timer when the game restarted gravity, and follows period changes.
    fn sync_gravity(&mut self, tui: &mut Tui) {
        let gravity = self.game.gravity();
        if gravity.generation() == self.gravity_generation {
            tui.set_tick_interval(gravity.interval());
        } else {
            self.gravity_generation = gravity.generation();
            tui.restart_tick(gravity.interval());
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.restart_tick(self.game.gravity().interval());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: &Event) {
        if let Some(key) = event.as_key_event() {
            self.handle_key(key);
            self.sync_gravity(tui);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let game_display = GameDisplay::new(&self.game).has_played(self.has_played);
        let bindings = match self.game.state() {
            GameState::On => PLAYING_KEYS,
            GameState::Paused => PAUSED_KEYS,
            GameState::Off => STOPPED_KEYS,
        };
        let help = KeyBindingDisplay::new(bindings);

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(game_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        self.game.tick();
        self.sync_gravity(tui);
    }
}
