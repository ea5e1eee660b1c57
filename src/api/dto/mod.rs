//! Data Transfer Objects for REST request/response serialization.
//!
//! Response shapes match what the browser dashboard and voice UI read, so
//! some fields keep their historical names (`interactionComplete`,
//! `guest_name`).

pub mod chat_dto;
pub mod common_dto;
pub mod floor_dto;
pub mod speech_dto;

pub use chat_dto::*;
pub use common_dto::*;
pub use floor_dto::*;
pub use speech_dto::*;
