//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` pushes live board updates (seatings,
//! waitlist joins, checkouts) to dashboard clients and answers status
//! requests.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
