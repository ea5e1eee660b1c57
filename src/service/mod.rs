//! Service layer: shared, lock-guarded access to the floor.
//!
//! [`FloorService`] wraps the [`crate::domain::Floor`] engine, returns
//! events directly from mutating calls, and publishes board updates
//! through the [`crate::domain::EventBus`].

pub mod floor_service;

pub use floor_service::{FloorService, Seating, Waitlisting};
