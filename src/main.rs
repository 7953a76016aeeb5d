// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Judo club command-line client
//!
//! Signs in against the club API, performs authenticated requests and
//! looks up the weight categories for a registration.

use anyhow::Context;
use clap::{Parser, Subcommand};
use judo_club_client::{
    config::Config,
    services::{analytics, weights},
    storage::JsonFileStore,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "judo-club", about = "Judo club API client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the weight brackets for a birth date and gender
    Weights {
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,
        /// Gender code (M or F)
        #[arg(long)]
        gender: Option<String>,
    },
    /// Sign in and store the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "JUDO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// GET an API path and print the response body
    Get {
        /// Path relative to the API base URL, e.g. /api/my-family/
        path: String,
    },
    /// Resolve a front-end route through the navigation guard
    Open { path: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let storage = JsonFileStore::open(&config.session_file)
        .with_context(|| format!("Failed to open {}", config.session_file.display()))?;
    tracing::debug!(api_url = %config.api_url, "Starting judo club client");

    let state = AppState::new(config, Arc::new(storage));
    let result = run(&state, cli.command).await;

    for toast in state.toasts.toasts() {
        eprintln!("[{:?}] {}", toast.kind, toast.message);
    }

    result
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Weights { birth_date, gender } => {
            analytics::track_event("registration", "weight_lookup", gender.as_deref(), None);
            for bracket in weights::weight_categories(birth_date.as_deref(), gender.as_deref()) {
                println!("{}\t{}", bracket.value, bracket.label);
            }
        }
        Command::Login { username, password } => {
            let login = state.api.login(&username, &password).await?;
            analytics::track_event("auth", "login", Some(&login.username), None);
            println!(
                "Signed in as {}{}",
                login.username,
                if login.is_staff { " (staff)" } else { "" }
            );
        }
        Command::Logout => {
            state.api.logout();
            println!("Signed out");
        }
        Command::Get { path } => {
            let response = state.api.get(&path).await?;
            println!("{}", response.text());
        }
        Command::Open { path } => {
            let route = state.router.navigate(&path)?;
            println!("{} ({})", route.path, route.name);
        }
    }
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(log_filter(EnvFilter::from_default_env()))
        .with(format)
        .init();
}

/// Crate logs at debug, everything else (analytics included) at info.
fn log_filter(base: EnvFilter) -> EnvFilter {
    base.add_directive("judo_club_client=debug".parse().unwrap())
        .add_directive("info".parse().unwrap())
}
