pub mod commands;
pub mod utils;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::App;
use crate::config::AppConfig;
use crate::storage::Persistence;

#[derive(Parser)]
#[command(name = "dash")]
#[command(about = "Dashboard shell - log in, navigate views and query the dashboard API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, help = "API base URL (overrides DASHBOARD_API_URL)")]
    pub api_url: Option<String>,

    #[arg(long, help = "Directory for durable application settings")]
    pub config_dir: Option<PathBuf>,

    #[arg(long, help = "Keep application settings in memory only")]
    pub ephemeral: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the environment config
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(dir) = &self.config_dir {
            config.config_dir = dir.clone();
        }
        if self.ephemeral {
            config.application_storage = Persistence::Session;
        }
        config
    }
}

/// One line typed at the `dash>` prompt
#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Auth(commands::auth::AuthCommands),

    #[command(flatten)]
    Navigate(commands::navigate::NavigateCommands),

    #[command(flatten)]
    Platform(commands::platform::PlatformCommands),

    #[command(about = "Leave the shell", alias = "quit")]
    Exit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Whether the shell keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Run one command against the shell state
pub async fn dispatch(command: Commands, app: &mut App, output_format: &OutputFormat) -> anyhow::Result<Flow> {
    match command {
        Commands::Auth(cmd) => commands::auth::handle(cmd, app, output_format).await?,
        Commands::Navigate(cmd) => commands::navigate::handle(cmd, app, output_format).await?,
        Commands::Platform(cmd) => commands::platform::handle(cmd, app, output_format)?,
        Commands::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

/// Parse and run a single input line; blank lines are ignored
pub async fn execute_line(line: &str, app: &mut App, output_format: &OutputFormat) -> anyhow::Result<Flow> {
    let words = utils::split_words(line)?;
    if words.is_empty() {
        return Ok(Flow::Continue);
    }

    let parsed = match ShellLine::try_parse_from(&words) {
        Ok(parsed) => parsed,
        Err(e) if !e.use_stderr() => {
            // --help and friends
            print!("{}", e);
            return Ok(Flow::Continue);
        }
        Err(e) => return Err(anyhow::anyhow!(e.to_string().trim().to_string())),
    };

    dispatch(parsed.command, app, output_format).await
}

/// Interactive loop over stdin; the process lifetime is the browsing session
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let mut app = App::new(cli.apply(config));

    tracing::debug!("Using API at {}", app.config().api_url);
    let navigation = app.start()?;
    utils::output_navigation(&output_format, &navigation)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if matches!(output_format, OutputFormat::Text) {
            print!("dash> ");
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match execute_line(&line, &mut app, &output_format).await {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                let code = e
                    .downcast_ref::<crate::error::ShellError>()
                    .map(|err| err.error_code());
                utils::output_error(&output_format, &e.to_string(), code)?;
            }
        }
    }

    Ok(())
}
