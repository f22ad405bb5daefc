//! # timetrack
//!
//! Client-side API binding and route guard for the time-tracking service
//! (issues, timers, time entries, weekly reports, GitHub sync).
//!
//! `net` talks to the backend over credentialed HTTP, `guard` decides whether
//! a route transition may proceed, and `routes` maps paths onto the page
//! surface. Configuration is injected through [`config::ClientConfig`] rather
//! than read from a browser location.

pub mod config;
pub mod error;
pub mod guard;
pub mod net;
pub mod routes;
pub mod session;

pub use config::{ClientConfig, GuardMode};
pub use error::ApiError;
pub use guard::{IdentityCheck, Navigation, NavigationGuard};
pub use net::api::ApiClient;
pub use net::query::Query;
pub use routes::{Route, Router};
pub use session::SessionState;
