//! Service control and log retrieval for a PM2-managed host.
//!
//! Pure of HTTP concerns: the API crate wraps [`services::ServiceControl`]
//! in handlers, and tests drive it through `exec::FakeExecutor`.

pub mod config;
pub mod error;
pub mod exec;
pub mod services;
