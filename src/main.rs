//! bidi-router CLI
//!
//! Loads a TOML route tree and either matches a path against it,
//! generates the path for a handler, or watches the file and keeps a
//! route table current.

use std::path::PathBuf;
use std::process::ExitCode;

use axum::http::Method;
use clap::{Parser, Subcommand};

use bidi_router::config::{load_config, ConfigError, ConfigWatcher};
use bidi_router::observability::init_logging;
use bidi_router::routing::{match_route, path_for, Attributes, Params, RouteTable};

#[derive(Parser)]
#[command(name = "bidi-router")]
#[command(about = "Match paths against a route tree and generate paths from it", long_about = None)]
struct Cli {
    /// Route configuration file.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a path and print the handler and parameters as JSON
    Match {
        path: String,

        /// Request method (GET, POST, ...)
        #[arg(short, long)]
        method: Option<String>,

        /// Request attribute, as key=value
        #[arg(short, long = "attr", value_parser = parse_pair)]
        attrs: Vec<(String, String)>,
    },
    /// Print the path that routes to a handler
    PathFor {
        handler: String,

        /// Parameter value, as key=value
        #[arg(short, long = "param", value_parser = parse_pair)]
        params: Vec<(String, String)>,
    },
    /// Keep the route table current as the config file changes
    Watch,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", s))
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability)?;

    let routes = config.build_routes().map_err(ConfigError::Validation)?;
    tracing::debug!(path = ?cli.config, "Route configuration loaded");

    match cli.command {
        Commands::Match { path, method, attrs } => {
            let mut attributes = Attributes::new();
            if let Some(method) = method {
                attributes.set_method(Method::from_bytes(method.to_ascii_uppercase().as_bytes())?);
            }
            for (key, value) in attrs {
                attributes.insert(key, value);
            }

            match match_route(&path, &routes, &attributes) {
                Some(m) => {
                    println!("{}", serde_json::to_string_pretty(&m)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("No route matched {}", path);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::PathFor { handler, params } => {
            let params: Params = params.into_iter().collect();
            match path_for(&handler, &routes, &params) {
                Ok(path) => {
                    println!("{}", path);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Watch => {
            let table = RouteTable::new(routes);
            let (watcher, mut updates) = ConfigWatcher::new(&cli.config);
            let _watcher = watcher.run()?;

            loop {
                tokio::select! {
                    update = updates.recv() => match update {
                        Some(routes) => table.replace(routes),
                        None => break,
                    },
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Shutdown signal received");
                        break;
                    }
                }
            }

            Ok(ExitCode::SUCCESS)
        }
    }
}
