//! # cafe-concierge
//!
//! Table allocation, waitlist, and conversational concierge service for a
//! small café.
//!
//! A fixed inventory of tables is seated first-fit in inventory order.
//! Parties that do not fit join a FIFO waitlist, and checking out a table
//! seats the first waiting party that fits it. Guests talk to an on-screen
//! concierge backed by a chat model with function calling; staff see the
//! floor through REST and live WebSocket updates.
//!
//! ## Architecture
//!
//! ```text
//! Clients (voice UI, dashboard)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── ConciergeAgent + ChatModel (concierge/)
//!     ├── SpeechSynthesizer (speech/)
//!     │
//!     ├── FloorService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     └── Floor engine (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod concierge;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod speech;
pub mod ws;
