pub mod cli;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod store;

pub use cli::{Cli, Commands};
pub use models::Config;
