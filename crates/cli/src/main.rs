//! s3shell - Interactive filesystem shell over S3
//!
//! Navigate buckets and folders with `cd`/`ls`, move objects around with
//! `cp`/`mv`, and transfer files with `upload`/`download`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use s3shell::context::ShellContext;
use s3shell::dispatcher::CommandDispatcher;
use s3shell::output::{Formatter, OutputConfig};
use s3shell::repl;
use s3shell_core::ProfileStore;
use s3shell_s3::S3Connector;

/// s3shell - browse S3 like a filesystem
#[derive(Parser, Debug)]
#[command(name = "s3shell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Credentials profile file
    #[arg(long, env = "S3SHELL_PROFILES")]
    profiles: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    no_color: bool,

    /// Disable the transfer spinner
    #[arg(long, default_value = "false")]
    no_progress: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("s3shell=debug,s3shell_core=debug,s3shell_s3=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let profiles = match cli.profiles {
        Some(path) => ProfileStore::with_path(path),
        None => ProfileStore::new()?,
    };
    let output = OutputConfig {
        no_color: cli.no_color,
        no_progress: cli.no_progress,
    };

    let mut ctx = ShellContext::new(Arc::new(S3Connector), profiles, output.clone());
    let dispatcher = CommandDispatcher::new();
    repl::run(&dispatcher, &mut ctx, &Formatter::new(output)).await
}
