//! HTTP gateway for the Pinhole URL shortener.
//!
//! Exposes the create and redirect endpoints on top of any
//! [`Shortener`](pinhole_core::Shortener) and
//! [`Redirector`](pinhole_redirector::Redirector).

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::{AppError, Result};
pub use state::AppState;
