//! Lifecycle management subsystem.
//!
//! SIGTERM/Ctrl-C → graceful shutdown of the serving loop.
//! SIGHUP → asynchronous config reload through the coordinator.

pub mod shutdown;
pub mod signals;

pub use shutdown::wait_for_shutdown;
pub use signals::spawn_reload_on_sighup;
