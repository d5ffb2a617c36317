use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use repometa::config::DEFAULT_CONFIG_PATH;
use repometa::{apply, dry_run, options, render};
use repometa::{Configuration, Environment, Flags, GitHubClient};

#[derive(Parser)]
#[command(name = "repometa")]
#[command(about = "Sync GitHub repository description, homepage and topics from .repo-metadata.yaml")]
#[command(version)]
struct Cli {
    /// Repository owner or organization [default: from TRAVIS_REPO_SLUG]
    #[arg(long)]
    owner: Option<String>,

    /// Repository name [default: from TRAVIS_REPO_SLUG]
    #[arg(long)]
    name: Option<String>,

    /// GitHub access token [default: $GITHUB_ACCESS_TOKEN]
    #[arg(long)]
    access_token: Option<String>,

    /// Only report what would change (`--dry-run=false` forces apply)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    dry_run: Option<bool>,

    /// Metadata file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = GitHubClient::DEFAULT_API_URL)]
    api_url: String,

    /// Disable coloured diff output
    #[arg(long)]
    no_color: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn flags(&self) -> Flags {
        Flags {
            owner: self.owner.clone(),
            name: self.name.clone(),
            access_token: self.access_token.clone(),
            dry_run: self.dry_run,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    debug!("Starting repometa v{}", env!("CARGO_PKG_VERSION"));

    let desired = Configuration::load(&cli.config).context("Failed to load repository metadata")?;
    let opts = options::resolve(&Environment::from_process(), cli.flags())
        .context("Failed to resolve options")?;

    if opts.dry_run {
        let client = GitHubClient::new(&opts.access_token, &cli.api_url)?;
        let renderer = render::for_stdout(cli.no_color);
        let mut stdout = std::io::stdout().lock();
        dry_run::report(&client, &opts, &desired, renderer.as_ref(), &mut stdout)
            .await
            .with_context(|| format!("Dry run against {} failed", opts.slug()))?;
    } else {
        let client = GitHubClient::new(&opts.access_token, &cli.api_url)?;
        apply::apply(&client, &opts, &desired)
            .await
            .with_context(|| format!("Applying metadata to {} failed", opts.slug()))?;
        info!("Done");
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
