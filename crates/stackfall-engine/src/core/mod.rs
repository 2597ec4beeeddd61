pub use self::{grid::*, piece::*, position::*};

pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod position;
