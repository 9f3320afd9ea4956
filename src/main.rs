use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hrefguard::cli;
use hrefguard::sanitize::UrlSanitizer;

#[derive(Debug, Parser)]
#[command(name = "hrefguard", version, about = "Neutralize dangerous href/src values")]
struct Cli {
    /// Policy file (default: .hrefguard/policy.yml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sanitize URLs given as arguments, or one per line on stdin
    Sanitize {
        urls: Vec<String>,

        /// Emit one JSON verdict per line
        #[arg(long)]
        json: bool,
    },
    /// Report links with blocked schemes in HTML/email files
    Scan {
        paths: Vec<PathBuf>,

        /// Emit one JSON finding per line
        #[arg(long)]
        json: bool,
    },
    /// Write a default .hrefguard/policy.yml
    Init,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    hrefguard::logging::init(args.verbose);

    match args.command {
        Command::Init => {
            let cwd = std::env::current_dir().context("cannot determine current directory")?;
            cli::init::run(&cwd)?;
        }
        Command::Sanitize { urls, json } => {
            let sanitizer = build_sanitizer(args.config.as_deref())?;
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            cli::sanitize_cmd::run(&sanitizer, &urls, json, stdin.lock(), stdout.lock())?;
        }
        Command::Scan { paths, json } => {
            let sanitizer = build_sanitizer(args.config.as_deref())?;
            let findings = cli::scan::run(&sanitizer, &paths, json, std::io::stdout().lock())?;
            if findings > 0 {
                std::io::Write::flush(&mut std::io::stdout())?;
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn build_sanitizer(config: Option<&std::path::Path>) -> anyhow::Result<UrlSanitizer> {
    let policy = cli::load_policy(config).context("failed to load policy")?;
    tracing::debug!(?policy, "loaded policy");
    UrlSanitizer::new(policy).context("failed to build sanitizer")
}
