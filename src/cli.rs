// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the serve and one-shot deploy subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deploy-hook")]
#[command(about = "Promote published container images into a local kind cluster")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// YAML configuration file (PORT and KIND_CLUSTER_NAME still override it)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the webhook receiver
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run the deployment pipeline once for an image
    Deploy {
        /// Remote image reference, e.g. ghcr.io/org/app:v1
        image: String,

        /// Directory to start the project root search from
        #[arg(long)]
        project_dir: Option<PathBuf>,
    },
}
