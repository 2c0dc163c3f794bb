use clap::Subcommand;
use serde_json::json;

use crate::app::App;
use crate::cli::utils::{navigation_json, output_navigation, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Log in with email and password")]
    Login {
        #[arg(help = "Account email")]
        email: String,
        #[arg(long, short, help = "Account password")]
        password: String,
    },

    #[command(about = "Forget the session and return to the login view")]
    Logout,

    #[command(about = "Show the current session")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, app: &mut App, output_format: &OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let navigation = app.login(&email, &password).await?;
            let session = app.session();

            output_success(
                output_format,
                &format!("Logged in as {}", session.name().unwrap_or(&email)),
                Some(json!({
                    "email": session.email(),
                    "name": session.name(),
                    "navigation": navigation_json(&navigation),
                })),
            )?;
            if matches!(output_format, OutputFormat::Text) {
                output_navigation(output_format, &navigation)?;
            }
            Ok(())
        }
        AuthCommands::Logout => {
            let navigation = app.logout();
            output_success(
                output_format,
                "Logged out",
                Some(json!({ "navigation": navigation_json(&navigation) })),
            )?;
            if matches!(output_format, OutputFormat::Text) {
                output_navigation(output_format, &navigation)?;
            }
            Ok(())
        }
        AuthCommands::Whoami => {
            let session = app.session();
            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "logged_in": session.logged_in(),
                            "email": session.email(),
                            "name": session.name(),
                            "picture_placeholder": session.picture_placeholder(),
                        }))?
                    );
                }
                OutputFormat::Text => {
                    if session.logged_in() {
                        println!(
                            "[{}] {} <{}>",
                            session.picture_placeholder().unwrap_or_default(),
                            session.name().unwrap_or("-"),
                            session.email().unwrap_or("-"),
                        );
                    } else {
                        println!("Not logged in");
                    }
                }
            }
            Ok(())
        }
    }
}
