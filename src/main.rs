// ABOUTME: Entry point for the deploy-hook CLI application.
// ABOUTME: Resolves configuration once and dispatches to the receiver or a one-shot deploy.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use deploy_hook::config::Config;
use deploy_hook::deploy::Pipeline;
use deploy_hook::error::Result;
use deploy_hook::runner::ProcessRunner;
use deploy_hook::server;
use deploy_hook::types::ImageRef;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbose flag
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            let pipeline = Pipeline::new(config, Arc::new(ProcessRunner::new()));
            server::serve(pipeline).await
        }
        Commands::Deploy { image, project_dir } => {
            let image = ImageRef::parse(&image)?;
            let mut pipeline = Pipeline::new(config, Arc::new(ProcessRunner::new()));
            if let Some(dir) = project_dir {
                pipeline = pipeline.with_search_dir(dir);
            }

            let deployed = pipeline.update(&image).await?;
            for warning in &deployed.warnings {
                eprintln!("Warning: {}", warning.message);
            }
            println!("Deployed {} as {}", deployed.image, deployed.local_image);
            Ok(())
        }
    }
}
