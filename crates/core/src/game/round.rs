//! A single round of blackjack

use super::card::{hand_value, Card};
use super::shoe::Shoe;

/// How a finished round settled for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Player wins even money
    Win,
    /// Two-card 21, pays 3:2
    Blackjack,
    Lose,
    /// Stake returned
    Push,
}

/// Round state machine: deal, player acts, dealer plays out, outcome.
#[derive(Debug)]
pub struct Round {
    player_hand: Vec<Card>,
    dealer_hand: Vec<Card>,
    outcome: Option<Outcome>,
}

impl Round {
    /// Deal two cards each, checking the shoe first. Naturals end the round
    /// immediately: both 21 is a push, player-only 21 pays 3:2, dealer-only
    /// 21 loses on the spot.
    pub fn deal(shoe: &mut Shoe) -> Self {
        shoe.ensure_fresh();

        let mut round = Self {
            player_hand: Vec::with_capacity(4),
            dealer_hand: Vec::with_capacity(4),
            outcome: None,
        };

        for _ in 0..2 {
            round.player_hand.push(shoe.draw());
            round.dealer_hand.push(shoe.draw());
        }

        round.outcome = naturals(round.player_score(), round.dealer_score());
        round
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.player_hand
    }

    pub fn dealer_hand(&self) -> &[Card] {
        &self.dealer_hand
    }

    pub fn player_score(&self) -> u32 {
        hand_value(&self.player_hand)
    }

    pub fn dealer_score(&self) -> u32 {
        hand_value(&self.dealer_hand)
    }

    /// The dealer's face-up card.
    pub fn dealer_upcard(&self) -> Card {
        self.dealer_hand[0]
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Doubling is only offered on the original two cards.
    pub fn can_double(&self) -> bool {
        !self.is_over() && self.player_hand.len() == 2
    }

    /// Player draws one card. Busting ends the round.
    pub fn hit(&mut self, shoe: &mut Shoe) {
        if self.is_over() {
            return;
        }
        self.player_hand.push(shoe.draw());
        if self.player_score() > 21 {
            self.outcome = Some(Outcome::Lose);
        }
    }

    /// Player stands; the dealer draws to 17 or better and the round is
    /// compared out.
    pub fn stand(&mut self, shoe: &mut Shoe) {
        if self.is_over() {
            return;
        }

        while self.dealer_score() < 17 {
            self.dealer_hand.push(shoe.draw());
        }

        let player = self.player_score();
        let dealer = self.dealer_score();
        self.outcome = Some(if dealer > 21 || player > dealer {
            Outcome::Win
        } else if player < dealer {
            Outcome::Lose
        } else {
            Outcome::Push
        });
    }

    /// Double down: one card, then a forced stand. The bet doubling itself
    /// is the bankroll's business.
    pub fn double_down(&mut self, shoe: &mut Shoe) {
        if !self.can_double() {
            return;
        }
        self.hit(shoe);
        if !self.is_over() {
            self.stand(shoe);
        }
    }
}

/// Outcome forced by two-card naturals, if any.
fn naturals(player_score: u32, dealer_score: u32) -> Option<Outcome> {
    match (player_score == 21, dealer_score == 21) {
        (true, true) => Some(Outcome::Push),
        (true, false) => Some(Outcome::Blackjack),
        (false, true) => Some(Outcome::Lose),
        (false, false) => None,
    }
}
