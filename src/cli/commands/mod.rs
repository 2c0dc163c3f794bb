pub mod auth;
pub mod navigate;
pub mod platform;
