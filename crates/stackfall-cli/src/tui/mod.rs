mod app;
mod event;
mod event_loop;
mod runner;

pub(crate) use self::{app::App, runner::Tui};
