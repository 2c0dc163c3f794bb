pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod guards;
pub mod models;
pub mod router;
pub mod session;
pub mod storage;
pub mod stores;

pub use app::App;
pub use error::{Result, ShellError};
pub use session::Session;
