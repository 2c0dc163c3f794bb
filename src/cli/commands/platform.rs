use clap::Subcommand;
use serde_json::json;

use crate::app::App;
use crate::cli::utils::{output_json, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum PlatformCommands {
    #[command(about = "Set the application and company names")]
    Define {
        #[arg(help = "Application name")]
        app_name: String,
        #[arg(help = "Company name")]
        company_name: String,
    },

    #[command(about = "Show application metadata")]
    Info,
}

pub fn handle(cmd: PlatformCommands, app: &mut App, output_format: &OutputFormat) -> anyhow::Result<()> {
    match cmd {
        PlatformCommands::Define { app_name, company_name } => {
            app.application_mut().define_platform(&app_name, &company_name)?;
            output_success(
                output_format,
                &format!("{} by {}", app_name, company_name),
                Some(json!({ "app_name": app_name, "company_name": company_name })),
            )
        }
        PlatformCommands::Info => {
            let state = app.application().state();
            match output_format {
                OutputFormat::Json => output_json(&serde_json::to_value(state)?),
                OutputFormat::Text => {
                    println!("App:      {}", state.app_name.as_deref().unwrap_or("-"));
                    println!("Company:  {}", state.company_name.as_deref().unwrap_or("-"));
                    println!("Theme:    {:?}", state.theme);
                    println!("Language: {}", state.language);
                    Ok(())
                }
            }
        }
    }
}
