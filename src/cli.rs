use chrono::{Local, NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::client::{render, session, ApiClient, ClientError};
use crate::dto::CreateMoodEntryRequest;

#[derive(Parser)]
#[command(name = "moodctl")]
#[command(about = "Record daily moods and review your history and trends")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Print raw JSON responses")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "MOODTRACK_URL",
        default_value = "http://localhost:8080",
        help = "Base URL of the mood API"
    )]
    pub url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create an account and log in")]
    Register {
        email: String,
        #[arg(long, env = "MOODTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    #[command(about = "Log in and remember the session")]
    Login {
        email: String,
        #[arg(long, env = "MOODTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    #[command(about = "Forget the stored session")]
    Logout,

    #[command(about = "Show the logged-in user")]
    Profile,

    #[command(about = "Record how you feel (1 Very Sad .. 5 Very Happy)")]
    Log {
        #[arg(value_parser = clap::value_parser!(i32).range(1..=5))]
        rating: i32,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, help = "Entry date as YYYY-MM-DD (default: today)")]
        date: Option<NaiveDate>,
    },

    #[command(about = "List your entries, newest first")]
    History,

    #[command(about = "Show averages, trend and distribution")]
    Analysis,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let dir = session::config_dir()?;
    let client = ApiClient::new(&cli.url);

    match cli.command {
        Commands::Register { email, password } => {
            let auth = client.register(&email, &password).await?;
            session::save(&dir, &session::Session::from_auth(client.base_url(), auth.clone()))?;
            emit(cli.json, &auth.user, || format!("Registered and logged in as {}", auth.user.email))
        }
        Commands::Login { email, password } => {
            let auth = client.login(&email, &password).await?;
            session::save(&dir, &session::Session::from_auth(client.base_url(), auth.clone()))?;
            emit(cli.json, &auth.user, || format!("Logged in as {}", auth.user.email))
        }
        Commands::Logout => {
            if session::clear(&dir)? {
                println!("Logged out");
            } else {
                println!("No stored session");
            }
            Ok(())
        }
        Commands::Profile => {
            let user = authenticated(client, &dir)?.profile().await?;
            emit(cli.json, &user, || format!("{} ({})", user.email, user.id))
        }
        Commands::Log { rating, notes, date } => {
            let request = CreateMoodEntryRequest {
                mood_rating: rating,
                notes,
                entry_date: entry_timestamp(date.unwrap_or_else(|| Local::now().date_naive())),
            };
            let entry = authenticated(client, &dir)?.create_mood(&request).await?;
            emit(cli.json, &entry, || {
                format!("Mood entry saved successfully!\n{}", render::render_entry(&entry))
            })
        }
        Commands::History => {
            let entries = authenticated(client, &dir)?.list_moods().await?;
            emit(cli.json, &entries, || render::render_history(&entries))
        }
        Commands::Analysis => {
            let analysis = authenticated(client, &dir)?.analysis().await?;
            emit(cli.json, &analysis, || render::render_analysis(&analysis))
        }
    }
}

fn authenticated(client: ApiClient, dir: &std::path::Path) -> anyhow::Result<ApiClient> {
    let stored = session::load(dir)?.ok_or(ClientError::NotLoggedIn)?;
    if stored.server != client.base_url() {
        tracing::warn!(
            session_server = %stored.server,
            server = %client.base_url(),
            "Stored session was issued by a different server"
        );
    }
    Ok(client.with_token(stored.token))
}

/// A picked calendar day is sent as midnight UTC of that day.
fn entry_timestamp(day: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN))
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        let rendered = text();
        if rendered.ends_with('\n') {
            print!("{}", rendered);
        } else {
            println!("{}", rendered);
        }
    }
    Ok(())
}
