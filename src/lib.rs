pub mod config;
pub mod error;
pub mod export;
pub mod intake;
pub mod processing;
pub mod session;


mod types;

pub use config::IntakeConfig;
pub use error::{IntakeError, Result};
pub use types::*;
