mod cli;
mod repl;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use advisor_api::{resolve_credentials, CredentialStore, Credentials, HttpChatApi};
use advisor_chat::Orchestrator;
use advisor_common::{AdvisorError, ConfigError};
use advisor_config::AdvisorConfig;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};

const DEFAULT_DIRECTIVE: &str = "advisor=info";

fn init_logging(directive: &str) {
    let filter = EnvFilter::from_default_env();
    let filter = match directive.parse() {
        Ok(d) => filter.add_directive(d),
        Err(e) => {
            eprintln!("ignoring log directive '{directive}': {e}");
            filter
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<AdvisorConfig, ConfigError> {
    match args.config {
        Some(ref path) => advisor_config::load_config_from(Path::new(path)),
        None => advisor_config::load_config(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Config first: it carries the default log level.
    let loaded = load_config(&args);
    let directive = args.log_directive().unwrap_or_else(|| match &loaded {
        Ok(config) => config.logging.directive(),
        Err(_) => DEFAULT_DIRECTIVE.to_string(),
    });
    init_logging(&directive);

    tracing::info!("Advisor v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        AdvisorConfig::default()
    });
    if let Some(ref url) = args.base_url {
        tracing::info!("Using base URL override: {url}");
        config.api.base_url = url.clone();
    }

    match run(args.command(), config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("advisor: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: AdvisorConfig) -> Result<(), AdvisorError> {
    let store = CredentialStore::from_config(&config.auth)?;
    match command {
        Command::Login { token, user } => {
            let mut credentials = Credentials::new(token);
            if let Some(user) = user {
                credentials = credentials.with_username(user);
            }
            store.save(&credentials)?;
            println!("Signed in as {}.", credentials.display_name());
            Ok(())
        }
        Command::Logout => {
            if store.clear()? {
                println!("Signed out.");
            } else {
                println!("Not signed in.");
            }
            Ok(())
        }
        Command::Chat => {
            let credentials = resolve_credentials(&config.auth, &store)?;
            let api = HttpChatApi::new(&config.api, &credentials)
                .map_err(|e| AdvisorError::Api(e.to_string()))?;
            tracing::info!(base_url = %api.base_url(), "opening chat");

            let orchestrator = Orchestrator::new(Arc::new(api), config.chat.clone());
            repl::run(orchestrator, credentials.display_name(), &config.chat).await?;
            tracing::info!("Shutdown complete");
            Ok(())
        }
    }
}
