//! Command execution layer.
//!
//! Every supervisor invocation goes through a [`CommandExecutor`]. The
//! production implementation spawns local processes; tests inject a
//! `FakeExecutor` (behind the `test-utils` feature).

pub mod executor;
#[cfg(any(test, feature = "test-utils"))]
pub mod fake;
pub mod subprocess;

pub use executor::{CommandError, CommandExecutor, CommandLine, CommandOutput};
#[cfg(any(test, feature = "test-utils"))]
pub use fake::{FakeExecutor, FakeResponse};
pub use subprocess::LocalExecutor;
