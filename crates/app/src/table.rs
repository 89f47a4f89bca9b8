//! Table loop: bets, rounds, and stat persistence
//!
//! Each finished round is written back through the session-gated profile
//! update, so chips and counters survive the sitting. The session is
//! refreshed after every round; if it lapses anyway, the loop bails out
//! with `SessionExpired` and the caller prompts for a fresh login.

use felt_core::game::{Bankroll, Card, Outcome, Round, Shoe};
use felt_core::{Authenticator, Error, ProfileUpdate, Result, Session};

use crate::prompt;

pub fn play(auth: &mut Authenticator, session: &mut Session) -> Result<()> {
    let mut shoe = Shoe::new(auth.config().shoe_decks);
    let mut bankroll = Bankroll::with_chips(auth.profile(session)?.chips);

    loop {
        println!("\nChips: {}", bankroll.chips());
        if bankroll.chips() == 0 {
            println!("You're out of chips! Game over.");
            break;
        }

        let input = prompt::line("Enter your bet (0 to quit, 'stats', 'passwd'): ")?;
        match input.as_str() {
            "0" | "quit" => break,
            "stats" => {
                show_stats(auth, session)?;
                continue;
            }
            "passwd" => {
                change_password(auth, session)?;
                continue;
            }
            _ => {}
        }

        let bet = match input.parse::<u64>() {
            Ok(bet) => bet,
            Err(_) => {
                println!("Invalid bet amount!");
                continue;
            }
        };

        if !bankroll.place_bet(bet) {
            println!("Insufficient chips!");
            continue;
        }

        let mut round = Round::deal(&mut shoe);
        println!(
            "\nYour hand: {} (Score: {})",
            fmt_hand(round.player_hand()),
            round.player_score()
        );
        println!(
            "Dealer's hand: [{}, Hidden] (Visible score: {})",
            round.dealer_upcard(),
            round.dealer_upcard().value()
        );

        while !round.is_over() {
            let can_double = round.can_double() && bankroll.chips() >= bankroll.current_bet();
            let choices = if can_double {
                "Hit (h), Stand (s) or Double (d)? "
            } else {
                "Hit (h) or Stand (s)? "
            };
            match prompt::line(choices)?.as_str() {
                "h" => {
                    round.hit(&mut shoe);
                    println!(
                        "Your hand: {} (Score: {})",
                        fmt_hand(round.player_hand()),
                        round.player_score()
                    );
                    if round.player_score() > 21 {
                        println!("Bust!");
                    }
                }
                "s" => round.stand(&mut shoe),
                "d" if can_double => {
                    bankroll.double_bet();
                    round.double_down(&mut shoe);
                    println!(
                        "Your hand: {} (Score: {})",
                        fmt_hand(round.player_hand()),
                        round.player_score()
                    );
                    if round.player_score() > 21 {
                        println!("Bust!");
                    }
                }
                _ => println!("Invalid action!"),
            }
        }

        println!(
            "\nDealer's hand: {} (Score: {})",
            fmt_hand(round.dealer_hand()),
            round.dealer_score()
        );

        // The loop above only exits once the round is over
        let Some(outcome) = round.outcome() else {
            continue;
        };
        bankroll.settle(outcome);
        println!("{}", result_text(outcome));

        let profile = auth.profile(session)?;
        let mut update = ProfileUpdate {
            chips: Some(bankroll.chips()),
            games_played: Some(profile.games_played + 1),
            ..ProfileUpdate::default()
        };
        match outcome {
            Outcome::Win | Outcome::Blackjack => update.games_won = Some(profile.games_won + 1),
            Outcome::Lose => update.games_lost = Some(profile.games_lost + 1),
            Outcome::Push => update.games_drawn = Some(profile.games_drawn + 1),
        }
        auth.update_profile(session, &update)?;
        auth.refresh_session(session);
    }

    let stats = bankroll.stats();
    println!(
        "\nFinal Stats: {} games, {} wins, Win rate: {}%",
        stats.games, stats.wins, stats.win_rate
    );
    auth.logout(session);
    Ok(())
}

fn show_stats(auth: &Authenticator, session: &Session) -> Result<()> {
    let profile = auth.profile(session)?;
    println!(
        "\n{}: {} games, {} wins, {} losses, {} draws, Win rate: {}%",
        profile.username,
        profile.games_played,
        profile.games_won,
        profile.games_lost,
        profile.games_drawn,
        profile.win_rate()
    );
    Ok(())
}

fn change_password(auth: &mut Authenticator, session: &Session) -> Result<()> {
    let old = prompt::line("Current password: ")?;
    let new = prompt::line("New password: ")?;
    match auth.change_password(session, &old, &new) {
        Ok(()) => println!("Password changed successfully"),
        Err(e @ Error::SessionExpired) => return Err(e),
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn result_text(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Blackjack => "BLACKJACK! You Win!",
        Outcome::Win => "You Win!",
        Outcome::Lose => "Dealer Wins!",
        Outcome::Push => "Push (Tie)!",
    }
}

fn fmt_hand(cards: &[Card]) -> String {
    let names: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
    format!("[{}]", names.join(", "))
}
