//! Data models for Felt

mod player;
mod session;

pub use player::{PlayerProfile, PlayerRecord, ProfileUpdate};
pub use session::Session;
