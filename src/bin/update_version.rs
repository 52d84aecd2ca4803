use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use devscripts::config::{self, FallbackPolicy};
use devscripts::git::Git2Repository;
use devscripts::interrupt::{self, EXIT_FAILURE};
use devscripts::stamper::{self, PatternExtractor, VersionStamper};
use devscripts::ui;

#[derive(clap::Parser)]
#[command(
    name = "update-version",
    about = "Stamp the next release version and commit hash into files",
    long_about = "Runs the release dry-run command, resolves the next version, writes it to the \
                  version marker file and replaces VERSION_HERE / GIT_COMMIT_HASH_HERE in every \
                  FILE. semantic-release needs GITHUB_TOKEN in the environment."
)]
struct Args {
    #[arg(value_name = "FILE", help = "Files to rewrite in place")]
    files: Vec<PathBuf>,

    #[arg(long, default_value = ".", help = "Directory to run in (repository root)")]
    root: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "POLICY", help = "Override the fallback: previous-tag or sentinel")]
    fallback: Option<FallbackPolicy>,

    #[arg(short, long, help = "Print debug output")]
    verbose: bool,
}

fn main() {
    interrupt::install_handler();
    let args = Args::parse();
    ui::set_verbose(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(EXIT_FAILURE);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref(), &args.root)?;
    if let Some(policy) = args.fallback {
        config.version.fallback = policy;
    }
    let extractor = PatternExtractor::from_config(&config.version)?;

    let output = stamper::release_dry_run(&args.root, &config.version)
        .context("Could not run the release dry-run")?;
    ui::display_raw_block(&output);

    let repo = Git2Repository::open(&args.root)?;
    let outcome = VersionStamper::new(&args.root, &repo, &config.version)
        .run(&output, &extractor, &args.files)?;

    ui::display_debug(&format!(
        "Wrote {} ({} updated, {} skipped)",
        outcome.marker.display(),
        outcome.updated.len(),
        outcome.skipped.len()
    ));
    ui::display_info(&format!(
        "Updated version to {} and commit hash to {}",
        outcome.resolution.version, outcome.commit
    ));

    Ok(())
}
