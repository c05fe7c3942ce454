pub mod app;
pub mod cli;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod session;
pub mod utils;

pub use config::AppConfig;
pub use session::Session;
