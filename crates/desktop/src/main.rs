use anyhow::{Context, Result};
use clap::{Parser, Subcommand, builder::NonEmptyStringValueParser};
use dotenv::dotenv;
use shared::{config::Config, domain::UserProfile, state::AppState, utils::init_logger};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "desktop", about = "Clinic desktop session control", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the logged-in user profile as JSON
    Whoami,
    /// Print the active session, token included, as JSON
    Status,
    /// Store a session issued by the backend
    Login {
        #[arg(long, env = "SESSION_TOKEN", value_parser = NonEmptyStringValueParser::new())]
        token: String,
        /// User profile as a JSON object, e.g. '{"name":"Dr. A","role":"Assistente"}'
        #[arg(long)]
        profile: String,
    },
    /// End the current session
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let config = Config::init().context("Failed to load configuration")?;

    init_logger("desktop", config.is_dev, config.enable_file_log);

    let state = AppState::new(&config).context("Failed to create AppState")?;
    let session = &state.session;

    match cli.command {
        Command::Whoami => match session.current_user() {
            Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
            None => println!("Not logged in"),
        },
        Command::Status => match session.session() {
            Some(active) => println!("{}", serde_json::to_string_pretty(&active)?),
            None => println!("Anonymous"),
        },
        Command::Login { token, profile } => {
            let user: UserProfile = serde_json::from_str(&profile)
                .context("--profile must be a JSON object")?;
            session.login(Some(user), &token);
            if !session.is_authenticated() {
                anyhow::bail!("Session could not be stored");
            }
            info!("Session stored");
            println!("Logged in");
        }
        Command::Logout => {
            session.logout().await;
            println!("Logged out");
        }
    }

    Ok(())
}
