pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;

pub use crate::adapters::trello::TrelloClient;
pub use crate::config::BoardConfig;
pub use crate::core::engine::{RunSummary, UpkeepEngine};
pub use crate::utils::error::{Result, UpkeepError};
