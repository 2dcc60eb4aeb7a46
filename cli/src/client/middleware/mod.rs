//! HTTP client middleware.

pub mod session;

pub use session::SessionMiddleware;
