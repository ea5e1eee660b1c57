//! Domain layer: tables, waitlist, the allocation engine, and events.
//!
//! [`Floor`] is the only stateful component. Everything else in this
//! module is a value type it owns or emits, plus the [`EventBus`] used to
//! fan board updates out to WebSocket clients.

pub mod entry_id;
pub mod event_bus;
pub mod floor;
pub mod floor_event;
pub mod party_size;
pub mod table;
pub mod waitlist;

pub use entry_id::EntryId;
pub use event_bus::EventBus;
pub use floor::{CheckoutResult, EtaPolicy, Floor, FloorStatus, Release, WaitlistRow};
pub use floor_event::{BoardUpdate, BoardUpdateKind, FloorEvent};
pub use party_size::PartySize;
pub use table::{Table, TableId, TableStatus};
pub use waitlist::{Waitlist, WaitlistEntry};
