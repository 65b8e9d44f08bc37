use std::sync::Arc;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use debate_feed::adapters::ReqwestHttpClient;
use debate_feed::cli::{parse_args, usage, version_line, CliCommand, RunArgs};
use debate_feed::cli_output::{print_outcome, print_update};
use debate_feed::{
    run_debate_with, DebateClient, DebateConfig, DebateRequest, RunOptions, SessionState,
};

/// Default log filter when RUST_LOG is unset.
const DEFAULT_LOG_FILTER: &str = "debate_feed=info";

fn main() -> Result<()> {
    // Handle flags that need no runtime before any initialization
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", usage());
            return Ok(());
        }
        _ => {}
    }

    color_eyre::install()?;
    init_tracing();

    let config = DebateConfig::from_env();
    let runtime = tokio::runtime::Runtime::new()?;

    match command {
        CliCommand::Health { url } => {
            let config = apply_url(config, url);
            let client = build_client(&config);
            let healthy = runtime.block_on(client.health_check())?;
            if healthy {
                println!("{} is healthy", config.base_url);
                Ok(())
            } else {
                Err(eyre!("{} reported unhealthy", config.base_url))
            }
        }
        CliCommand::Run(args) => runtime.block_on(run(config, args)),
        CliCommand::Version | CliCommand::Help => Ok(()),
    }
}

/// Log to stderr so stdout carries only the feed.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_url(config: DebateConfig, url: Option<String>) -> DebateConfig {
    match url {
        Some(url) => config.with_base_url(url),
        None => config,
    }
}

fn build_client(config: &DebateConfig) -> DebateClient {
    DebateClient::with_http_client(config.base_url.clone(), Arc::new(ReqwestHttpClient::new()))
}

async fn run(config: DebateConfig, args: RunArgs) -> Result<()> {
    let config = apply_url(config, args.url.clone());

    let mut request = DebateRequest::new(args.prompt, args.confidence)?;
    if let Some(rounds) = args.rounds {
        request = request.with_max_rounds(rounds)?;
    }

    let client = build_client(&config);
    let options = RunOptions::from_config(&config);
    let mut session = SessionState::with_policy(config.supersession);

    // Ctrl+C cancels the debate; the runner records it and ends the session
    let cancel = options.cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
        warn!("could not install Ctrl+C handler: {}", e);
    }

    info!(url = %config.base_url, "starting debate");
    let result = run_debate_with(&client, &request, &mut session, &options, print_update).await;
    print_outcome(&session);

    result.map(|_| ()).map_err(Into::into)
}
