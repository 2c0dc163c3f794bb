pub mod client;

pub use client::{auth_headers, ApiClient};
