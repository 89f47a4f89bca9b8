//! Felt - login-gated blackjack for the terminal
//!
//! Accounts live in an encrypted local store; chips and game statistics
//! persist per player across sittings.

use std::process;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use felt_core::{config, Authenticator, Config, Error};

mod prompt;
mod table;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Felt");

    let data_dir = match config::default_data_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::error!("Failed to resolve data directory: {}", e);
            process::exit(1);
        }
    };

    let cfg = match Config::load(data_dir.join("config.toml")) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let mut auth = match Authenticator::open(&data_dir, cfg) {
        Ok(auth) => auth,
        Err(Error::StoreCorrupt(reason)) => {
            tracing::error!(%reason, "credential store unreadable");
            eprintln!("The player store exists but could not be decrypted: {reason}");
            eprintln!(
                "Restore the key file at {} or move the store aside before restarting.",
                data_dir.join(".vault.key").display()
            );
            process::exit(1);
        }
        Err(e) => {
            tracing::error!("Failed to initialize: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&mut auth) {
        eprintln!("Fatal: {e}");
        process::exit(1);
    }
}

fn run(auth: &mut Authenticator) -> felt_core::Result<()> {
    println!("Welcome to Felt Blackjack!");

    loop {
        println!("\n[1] Log in  [2] Register  [3] Import legacy accounts  [4] Quit");
        match prompt::line("> ")?.as_str() {
            "1" => {
                let username = prompt::line("Username: ")?;
                let password = prompt::line("Password: ")?;
                match auth.login(&username, &password) {
                    Ok(mut session) => {
                        println!("Login successful");
                        match table::play(auth, &mut session) {
                            Err(Error::SessionExpired) => {
                                println!("Session expired. Please log in again.");
                            }
                            other => other?,
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            "2" => {
                let username = prompt::line("Username: ")?;
                let password = prompt::line("Password: ")?;
                match auth.register(&username, &password) {
                    Ok(()) => println!("User registered successfully"),
                    Err(e) => println!("{e}"),
                }
            }
            "3" => {
                let path = prompt::line("Path to legacy users.json: ")?;
                match auth.import_legacy(&path) {
                    Ok(n) => println!("Migrated {n} users successfully"),
                    Err(e) => println!("Migration failed: {e}"),
                }
            }
            "4" | "q" => break,
            _ => println!("Invalid choice"),
        }
    }

    println!("Thanks for playing!");
    Ok(())
}
