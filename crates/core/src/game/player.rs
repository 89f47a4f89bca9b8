//! Table bankroll and per-sitting statistics

use super::round::Outcome;

/// Chips and bet for one sitting at the table.
///
/// The persisted balance lives in the credential store; this type only
/// tracks the chips in play and the counters for the current sitting.
#[derive(Debug, Clone)]
pub struct Bankroll {
    chips: u64,
    current_bet: u64,
    wins: u32,
    losses: u32,
    draws: u32,
}

/// Snapshot of a sitting's results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SittingStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub win_rate: f64,
}

impl Bankroll {
    pub fn with_chips(chips: u64) -> Self {
        Self {
            chips,
            current_bet: 0,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    pub fn chips(&self) -> u64 {
        self.chips
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Move chips onto the table. Fails on a zero bet or insufficient chips.
    pub fn place_bet(&mut self, amount: u64) -> bool {
        if amount == 0 || amount > self.chips {
            return false;
        }
        self.current_bet = amount;
        self.chips -= amount;
        true
    }

    /// Double the bet for a double-down. Fails if the remaining chips do not
    /// cover the original bet.
    pub fn double_bet(&mut self) -> bool {
        if self.current_bet == 0 || self.chips < self.current_bet {
            return false;
        }
        self.chips -= self.current_bet;
        self.current_bet *= 2;
        true
    }

    /// Pay out the finished round and clear the bet. A win pays 1:1, a
    /// blackjack 3:2 (rounded down on odd bets), a push returns the stake.
    pub fn settle(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => {
                self.chips += self.current_bet * 2;
                self.wins += 1;
            }
            Outcome::Blackjack => {
                self.chips += self.current_bet + self.current_bet * 3 / 2;
                self.wins += 1;
            }
            Outcome::Lose => {
                self.losses += 1;
            }
            Outcome::Push => {
                self.chips += self.current_bet;
                self.draws += 1;
            }
        }
        self.current_bet = 0;
    }

    pub fn stats(&self) -> SittingStats {
        let games = self.wins + self.losses + self.draws;
        let win_rate = if games == 0 {
            0.0
        } else {
            (self.wins as f64 / games as f64 * 10_000.0).round() / 100.0
        };
        SittingStats {
            games,
            wins: self.wins,
            losses: self.losses,
            draws: self.draws,
            win_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bet_requires_sufficient_chips() {
        let mut bankroll = Bankroll::with_chips(100);
        assert!(!bankroll.place_bet(0));
        assert!(!bankroll.place_bet(101));
        assert!(bankroll.place_bet(100));
        assert_eq!(bankroll.chips(), 0);
        assert_eq!(bankroll.current_bet(), 100);
    }

    #[test]
    fn win_pays_even_money() {
        let mut bankroll = Bankroll::with_chips(100);
        bankroll.place_bet(40);
        bankroll.settle(Outcome::Win);
        assert_eq!(bankroll.chips(), 140);
        assert_eq!(bankroll.current_bet(), 0);
        assert_eq!(bankroll.stats().wins, 1);
    }

    #[test]
    fn blackjack_pays_three_to_two() {
        let mut bankroll = Bankroll::with_chips(100);
        bankroll.place_bet(40);
        bankroll.settle(Outcome::Blackjack);
        assert_eq!(bankroll.chips(), 160);
    }

    #[test]
    fn odd_blackjack_bet_rounds_down() {
        let mut bankroll = Bankroll::with_chips(100);
        bankroll.place_bet(25);
        bankroll.settle(Outcome::Blackjack);
        // 75 + 25 + 37
        assert_eq!(bankroll.chips(), 137);
    }

    #[test]
    fn loss_forfeits_the_bet() {
        let mut bankroll = Bankroll::with_chips(100);
        bankroll.place_bet(40);
        bankroll.settle(Outcome::Lose);
        assert_eq!(bankroll.chips(), 60);
        assert_eq!(bankroll.stats().losses, 1);
    }

    #[test]
    fn push_returns_the_stake() {
        let mut bankroll = Bankroll::with_chips(100);
        bankroll.place_bet(40);
        bankroll.settle(Outcome::Push);
        assert_eq!(bankroll.chips(), 100);
        assert_eq!(bankroll.stats().draws, 1);
    }

    #[test]
    fn double_bet_needs_cover() {
        let mut bankroll = Bankroll::with_chips(100);
        bankroll.place_bet(60);
        assert!(!bankroll.double_bet());

        let mut bankroll = Bankroll::with_chips(100);
        bankroll.place_bet(40);
        assert!(bankroll.double_bet());
        assert_eq!(bankroll.current_bet(), 80);
        assert_eq!(bankroll.chips(), 20);

        bankroll.settle(Outcome::Win);
        assert_eq!(bankroll.chips(), 180);
    }

    #[test]
    fn win_rate_over_a_sitting() {
        let mut bankroll = Bankroll::with_chips(1000);
        for outcome in [Outcome::Win, Outcome::Lose, Outcome::Push] {
            bankroll.place_bet(10);
            bankroll.settle(outcome);
        }
        let stats = bankroll.stats();
        assert_eq!(stats.games, 3);
        assert_eq!(stats.win_rate, 33.33);
    }
}
