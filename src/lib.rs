pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod interrupt;
pub mod license;
pub mod notes;
pub mod stamper;
pub mod ui;

pub use error::{DevscriptsError, Result};
