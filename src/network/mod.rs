//! Network layer - gateway round trips off the app actor
//!
//! The Network actor receives gateway commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
