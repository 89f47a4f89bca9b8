//! Blackjack game engine
//!
//! Pure table logic with no persistence: cards and scoring, the dealing
//! shoe, the round state machine, and the per-sitting bankroll. The app
//! layer wires outcomes back into the credential store.

mod card;
mod player;
mod round;
mod shoe;

pub use card::{hand_value, Card, Rank, Suit};
pub use player::{Bankroll, SittingStats};
pub use round::{Outcome, Round};
pub use shoe::Shoe;
