//! Multi-deck dealing shoe

use rand::seq::SliceRandom;
use rand::thread_rng;

use super::card::{Card, Rank, Suit};

/// Cards in one standard deck.
const DECK_SIZE: usize = 52;

/// A shoe of several shuffled decks. Refilled before a deal once it runs
/// below the reshuffle threshold, never mid-round.
#[derive(Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    decks: usize,
}

impl Shoe {
    pub fn new(decks: usize) -> Self {
        let mut shoe = Self {
            cards: Vec::with_capacity(decks * DECK_SIZE),
            decks,
        };
        shoe.refill();
        shoe
    }

    /// Remaining-card count at or below which the shoe is rebuilt
    /// (60% of the full shoe).
    pub fn threshold(&self) -> usize {
        self.decks * DECK_SIZE * 6 / 10
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Rebuild and reshuffle the full shoe.
    pub fn refill(&mut self) {
        self.cards.clear();
        for _ in 0..self.decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    self.cards.push(Card::new(rank, suit));
                }
            }
        }
        self.cards.shuffle(&mut thread_rng());
    }

    /// Refill if the shoe is empty or at/below the reshuffle threshold.
    /// Called before each deal.
    pub fn ensure_fresh(&mut self) {
        if self.cards.is_empty() || self.cards.len() <= self.threshold() {
            self.refill();
        }
    }

    /// Draw the next card, refilling first if the shoe ran dry.
    pub fn draw(&mut self) -> Card {
        if self.cards.is_empty() {
            self.refill();
        }
        // Refill guarantees a non-empty shoe
        self.cards.pop().unwrap_or_else(|| {
            unreachable!("shoe is refilled before drawing");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn full_shoe_has_all_cards() {
        let shoe = Shoe::new(8);
        assert_eq!(shoe.remaining(), 416);
    }

    #[test]
    fn shoe_contains_each_card_once_per_deck() {
        let shoe = Shoe::new(2);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for card in &shoe.cards {
            *counts.entry(card.to_string()).or_default() += 1;
        }
        assert_eq!(counts.len(), 52);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn threshold_is_sixty_percent() {
        assert_eq!(Shoe::new(8).threshold(), 249);
        assert_eq!(Shoe::new(1).threshold(), 31);
    }

    #[test]
    fn ensure_fresh_refills_at_threshold() {
        let mut shoe = Shoe::new(1);
        while shoe.remaining() > shoe.threshold() {
            shoe.draw();
        }
        shoe.ensure_fresh();
        assert_eq!(shoe.remaining(), 52);
    }

    #[test]
    fn ensure_fresh_leaves_a_healthy_shoe_alone() {
        let mut shoe = Shoe::new(1);
        shoe.draw();
        let remaining = shoe.remaining();
        shoe.ensure_fresh();
        assert_eq!(shoe.remaining(), remaining);
    }

    #[test]
    fn draw_never_exhausts() {
        let mut shoe = Shoe::new(1);
        for _ in 0..200 {
            shoe.draw();
        }
        assert!(shoe.remaining() > 0);
    }
}
