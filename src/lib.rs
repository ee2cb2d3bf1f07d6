pub type Result<T> = std::result::Result<T, error::Error>;

mod app;
mod cli;
mod config;
pub mod error;
pub mod format;
mod logging;
pub mod naming;
mod output;
mod split;
pub mod time;
pub mod tracklist;
mod types;

pub use app::run;
pub use types::TrackRecord;

#[cfg(test)]
mod tests;
