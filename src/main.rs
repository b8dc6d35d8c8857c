use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use volunteer_hub::clients::Clients;
use volunteer_hub::commands;
use volunteer_hub::config::Config;
use volunteer_hub::http::ApiClient;
use volunteer_hub::session::SessionStore;
use volunteer_hub::{
    ApplicantCommands, AuthCommands, ConfigCommands, MissionCommands, SdgCommands, SkillCommands,
};

/// Volunteer-matching platform dashboards in your terminal.
#[derive(Parser, Debug)]
#[command(name = "volunteer-hub", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Override the API base URL for this run
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the dashboard for your account type
    Dashboard,
    /// Browse and apply to missions
    #[command(subcommand)]
    Missions(MissionCommands),
    /// Review applicants for your missions
    #[command(subcommand)]
    Applicants(ApplicantCommands),
    /// Manage your skills
    #[command(subcommand)]
    Skills(SkillCommands),
    /// Sustainable Development Goal catalogue
    #[command(subcommand)]
    Sdg(SdgCommands),
    /// Manage the stored API token
    #[command(subcommand)]
    Auth(AuthCommands),
    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = Config::load_or_init()?;
    if let Some(url) = cli.api_url.as_deref() {
        config
            .override_base_url(url)
            .context("invalid --api-url")?;
    }

    let store = SessionStore::new(config.token_file());
    let session = store.load();
    let api = ApiClient::from_config(&config, session).context("failed to build HTTP client")?;
    let clients = Clients::new(api);

    let run = async {
        match cli.command {
            Commands::Dashboard => commands::handle_dashboard(&clients).await,
            Commands::Missions(cmd) => commands::handle_mission_command(cmd, &clients).await,
            Commands::Applicants(cmd) => commands::handle_applicant_command(cmd, &clients).await,
            Commands::Skills(cmd) => commands::handle_skill_command(cmd, &clients).await,
            Commands::Sdg(cmd) => commands::handle_sdg_command(cmd, &clients).await,
            Commands::Auth(cmd) => commands::handle_auth_command(cmd, &store, &clients).await,
            Commands::Config(cmd) => commands::handle_config_command(cmd, &config),
        }
    };

    // Dropping `run` aborts whatever request is in flight.
    tokio::select! {
        result = run => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, request cancelled");
            Ok(())
        }
    }
}
