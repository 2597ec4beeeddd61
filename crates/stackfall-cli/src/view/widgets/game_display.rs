use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use stackfall_engine::{Game, GameState};

use crate::view::widgets::{GridDisplay, StatsDisplay, color, style};

/// Field, hold and next panels, and statistics laid out side by side.
#[derive(Debug)]
pub(crate) struct GameDisplay<'a> {
    game: &'a Game,
    has_played: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> GameDisplay<'a> {
    pub(crate) fn new(game: &'a Game) -> Self {
        Self {
            game,
            has_played: false,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    /// Whether a stopped game is over, rather than not started yet.
    pub(crate) fn has_played(self, has_played: bool) -> Self {
        Self { has_played, ..self }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.game.state() {
            GameState::On => color::WHITE,
            GameState::Paused => color::YELLOW,
            GameState::Off => color::RED,
        };
        let panel = |title| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let field = GridDisplay::new(self.game.field())
            .hidden_rows(<Game>::HIDDEN_ROWS)
            .show_dots(true)
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let hold_panel = GridDisplay::new(self.game.hold_grid()).block(panel("HOLD"));
        let next_panel = GridDisplay::new(self.game.preview()).block(panel("NEXT"));
        let stats = StatsDisplay::new(self.game).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), stats.width())),
            Constraint::Length(field.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, stats_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(stats.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let hold_area = hold_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(hold_panel.width())]).flex(Flex::End),
        )[0];
        let stats_area = stats_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(stats.width())]).flex(Flex::End),
        )[0];

        let [field_area] =
            Layout::vertical([Constraint::Length(field.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let field_width = field.width();
        hold_panel.render(hold_area, buf);
        stats.render(stats_area, buf);
        field.render(field_area, buf);
        next_panel.render(next_area, buf);

        let popup = match self.game.state() {
            GameState::On => None,
            GameState::Paused => Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW))),
            GameState::Off if self.has_played => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
            GameState::Off => Some(("PRESS N", Style::new().fg(color::BLACK).bg(color::WHITE))),
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = field_area.centered(Constraint::Length(field_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
