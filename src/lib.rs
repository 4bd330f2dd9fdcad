//! Wordsmoke client core
//!
//! This crate provides the portable logic behind the Wordsmoke game client:
//! - Wordle-style letter feedback for a guess against a goal word
//! - Reconciliation of server game/round snapshots into client state
//! - Stable per-viewer ordering of submissions for voting
//! - Round and game report derivations
//! - An HTTP client for the game server and a `WebSocket` change listener

pub mod api;
pub mod config;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod services;
pub mod sessions;
pub mod state;
pub mod utils;

pub use api::{FetchOptions, GameApi, HttpGameApi, LogStrategy};
pub use errors::ClientError;
pub use services::{GameRoomModel, RefreshMode};
pub use sessions::{GameSession, SessionHandle};
pub use state::RoomSnapshot;
