//! Networking modules for the REST gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the HTTP client and exposes one method per remote operation,
//! `request` and `query` describe a single outbound call, and `types` defines
//! the wire schema returned by the backend.

pub mod api;
pub mod query;
pub mod request;
pub mod types;
