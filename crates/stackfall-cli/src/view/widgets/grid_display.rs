use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::Grid;

use crate::view::widgets::{CellDisplay, to_u16};

/// Renders the bottom `visible_rows` rows of a grid, top row first.
#[derive(Debug)]
pub(crate) struct GridDisplay<'a> {
    grid: &'a Grid,
    visible_rows: usize,
    show_dots: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub(crate) fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            visible_rows: grid.num_rows(),
            show_dots: false,
            block: None,
        }
    }

    /// Hides rows at the top of the grid.
    pub(crate) fn hidden_rows(self, hidden_rows: usize) -> Self {
        Self {
            visible_rows: self.grid.num_rows().saturating_sub(hidden_rows),
            ..self
        }
    }

    pub(crate) fn show_dots(self, show_dots: bool) -> Self {
        Self { show_dots, ..self }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        to_u16(self.grid.num_cols()) * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        to_u16(self.visible_rows) * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.grid.num_cols()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..self.visible_rows).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let screen_rows = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));
        // Row 0 is the bottom of the grid but the top of the screen.
        let grid = self.grid;
        let grid_rows = (0..self.visible_rows)
            .rev()
            .map(move |row| grid.row(row).into_iter().flatten());

        for (screen_row, cells) in iter::zip(screen_rows, grid_rows) {
            for (screen_cell, cell) in iter::zip(screen_row, cells) {
                CellDisplay::from_cell(cell, self.show_dots).render(screen_cell, buf);
            }
        }
    }
}
