pub mod animator;
pub mod app;
pub mod config;
pub mod display;
pub mod errors;
pub mod estimator;
pub mod format;
pub mod models;
pub mod poller;
pub mod source;
pub mod state;

pub use app::build_poller;
pub use config::{load_config, load_from_env, resolve_config_path, Config};
pub use display::{DisplaySink, MemoryDisplay, TerminalDisplay};
pub use errors::AppError;
pub use poller::Poller;
