//! Per-user configuration: provider choice and API key.

pub mod paths;
pub mod store;

pub use paths::{HOME_ENV_VAR, Paths, config_dir, paths};
pub use store::Config;
