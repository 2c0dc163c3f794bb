pub mod application;
pub mod user;

pub use application::{ApplicationState, ApplicationStore, Theme};
pub use user::UserStore;
