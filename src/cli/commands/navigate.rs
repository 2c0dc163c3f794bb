use std::collections::BTreeMap;

use clap::Subcommand;
use serde_json::{json, Value};

use crate::app::App;
use crate::cli::utils::{output_json, output_navigation};
use crate::cli::OutputFormat;
use crate::router::{RouteId, RouteKind, ROUTES};

#[derive(Subcommand)]
pub enum NavigateCommands {
    #[command(about = "Navigate to a path, e.g. /details/42")]
    Go {
        #[arg(help = "Target path")]
        path: String,
    },

    #[command(about = "Navigate to a named view, e.g. details-view 42")]
    Open {
        #[arg(help = "View name")]
        name: String,
        #[arg(help = "Optional id parameter")]
        id: Option<String>,
    },

    #[command(about = "List the route table")]
    Routes,

    #[command(about = "Authenticated GET against the API, printing the JSON body")]
    Get {
        #[arg(help = "API path, e.g. /platforms")]
        path: String,
    },
}

pub async fn handle(cmd: NavigateCommands, app: &mut App, output_format: &OutputFormat) -> anyhow::Result<()> {
    match cmd {
        NavigateCommands::Go { path } => {
            let navigation = app.navigate(&path)?;
            output_navigation(output_format, &navigation)
        }
        NavigateCommands::Open { name, id } => {
            let route = RouteId::from_name(&name)
                .ok_or_else(|| anyhow::anyhow!("Unknown view '{}'", name))?;

            let mut params = BTreeMap::new();
            if let Some(id) = id {
                params.insert("id".to_string(), id);
            }

            let navigation = app.push(route, &params)?;
            output_navigation(output_format, &navigation)
        }
        NavigateCommands::Routes => output_routes(output_format),
        NavigateCommands::Get { path } => {
            // built per request so the header matches the session right now
            let api = app.api()?;
            let body: Value = api.get_json(&path).await?;
            output_json(&body)
        }
    }
}

fn output_routes(output_format: &OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let routes: Vec<Value> = ROUTES
                .iter()
                .map(|record| {
                    json!({
                        "name": record.name(),
                        "path": record.path,
                        "layout": record.layout,
                        "guards": record.guards.len(),
                        "redirect": match record.kind {
                            RouteKind::Redirect(to) => Some(to.name()),
                            RouteKind::View(_) => None,
                        },
                    })
                })
                .collect();
            output_json(&json!({ "routes": routes }))
        }
        OutputFormat::Text => {
            for record in ROUTES {
                match record.kind {
                    RouteKind::View(id) => println!("{:<16} {:<16} {}", id.name(), record.path, record.layout.unwrap_or("-")),
                    RouteKind::Redirect(to) => println!("{:<16} {:<16} → {}", record.name(), record.path, to),
                }
            }
            Ok(())
        }
    }
}
