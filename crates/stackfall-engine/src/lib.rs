pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({col}, {row}) is outside the grid")]
pub struct OutOfRangeError {
    pub col: usize,
    pub row: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("initial level must be between 1 and {}, got {_0}", <Game>::MAX_LEVEL)]
    InitialLevel(#[error(not(source))] usize),
    #[display(
        "field size must be between {min}x{min} and {max}x{max}, got {cols}x{rows}",
        min = <Game>::MIN_FIELD_SIZE,
        max = <Game>::MAX_FIELD_SIZE
    )]
    FieldSize { cols: usize, rows: usize },
}
