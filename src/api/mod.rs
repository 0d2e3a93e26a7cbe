//! HTTP boundary consumed by the pharmacy locator backend

pub mod http;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
