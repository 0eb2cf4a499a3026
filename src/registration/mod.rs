//! Remote registration API integration.

pub mod client;

pub use client::{CapacityClient, CapacityError, PlanCapacity};
