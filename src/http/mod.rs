//! HTTP serving subsystem.

pub mod server;

pub use server::{AppState, HttpServer};
