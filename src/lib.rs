//! # Motiv Quotes
//!
//! A terminal app for sharing interesting quotes and voting on them.
//!
//! ## Features
//! - Category filter bar backed by a fixed registry
//! - Quote submission with validation
//! - Interesting / mind blowing / false votes with disputed marking
//! - Supabase (PostgREST) backend, or an in-memory demo store
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod browser;
pub mod categories;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use models::{CategoryFilter, NewQuote, Quote, QuoteId, VoteKind, VotePatch};
pub use gateway::{GatewayError, MemoryGateway, QuoteGateway, SupabaseGateway};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
pub use config::Config;
