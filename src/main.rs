mod app;
mod client;
mod config;
mod routes;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PCC Mock Auth — stand-in for the PointClickCare OAuth token endpoint
/// during local development and testing.
#[derive(Parser, Debug)]
#[command(name = "pcc-mock-auth", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the mock token endpoint (default)
    Serve(ServeArgs),
    /// Request a token from a running auth service and print it
    FetchToken(FetchTokenArgs),
    /// Authenticate, then fetch and print one patient summary
    FetchSummary(FetchSummaryArgs),
}

#[derive(clap::Args, Debug, Default)]
struct ServeArgs {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind (overrides config file and environment)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config file and environment)
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(clap::Args, Debug)]
struct FetchTokenArgs {
    /// Base URL of the auth service, e.g. http://localhost:8080
    #[arg(long)]
    auth_url: String,

    #[arg(long, default_value = "")]
    client_id: String,

    #[arg(long, default_value = "")]
    client_secret: String,
}

#[derive(clap::Args, Debug)]
struct FetchSummaryArgs {
    #[command(flatten)]
    auth: FetchTokenArgs,

    /// Base URL of the consumer service serving patient summaries
    #[arg(long)]
    consumer_url: String,

    /// Patient identifier to summarize
    #[arg(long, default_value = "test-simpl-id")]
    simpl_id: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(args).await,
        Command::FetchToken(args) => fetch_token(args).await,
        Command::FetchSummary(args) => fetch_summary(args).await,
    }
}

async fn serve(args: ServeArgs) {
    let mut cfg = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // CLI flags override config and environment
    if let Some(host) = args.host {
        cfg.server.host = host;
    }
    if let Some(port) = args.port {
        cfg.server.port = port;
    }

    let bind_addr = cfg.server.bind_addr();
    tracing::info!(route = app::TOKEN_PATH, "Mock PCC token endpoint configured");
    tracing::info!("Listening on {bind_addr}");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {bind_addr}: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app::router())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Server error: {e}");
            std::process::exit(1);
        });
}

async fn fetch_token(args: FetchTokenArgs) {
    match client::fetch_token(&args.auth_url, &args.client_id, &args.client_secret).await {
        Ok(token) => {
            tracing::info!(token_type = %token.token_type, expires_in = token.expires_in, "Authenticated");
            match serde_json::to_string_pretty(&token) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    tracing::error!("Failed to render token: {e}");
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            tracing::error!("API error: {e}");
            std::process::exit(1);
        }
    }
}

async fn fetch_summary(args: FetchSummaryArgs) {
    let auth = args.auth;
    let token = match client::fetch_token(&auth.auth_url, &auth.client_id, &auth.client_secret).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("API error: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Authenticated");

    let summary =
        match client::fetch_patient_summary(&args.consumer_url, &token.access_token, &args.simpl_id)
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!("API error: {e}");
                std::process::exit(1);
            }
        };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("Failed to render patient summary: {e}");
            std::process::exit(1);
        }
    }
}
