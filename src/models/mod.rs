pub mod platform;
pub mod user;

pub use platform::{Platform, Sensor};
pub use user::{AuthResponse, Credentials};
