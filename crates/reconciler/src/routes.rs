pub mod app;
pub mod callback;
pub mod health;
pub mod notify;

pub use app::{AppState, Frontend, Health};
