pub mod config;
pub mod error;

pub use config::{Config, ParserConfig};
pub use error::ConfigError;
