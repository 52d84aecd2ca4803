use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use devscripts::config;
use devscripts::domain::ReleaseTag;
use devscripts::git::Git2Repository;
use devscripts::interrupt::{self, EXIT_FAILURE};
use devscripts::notes::ReleaseNotesGenerator;
use devscripts::ui;

#[derive(clap::Parser)]
#[command(
    name = "create-release-notes",
    about = "Create release notes through conventional commits."
)]
struct Args {
    #[arg(
        value_name = "TAG_NAME",
        help = "Name of the tag this release note is for, in the form vMAJOR.MINOR.PATCH"
    )]
    tag: ReleaseTag,

    #[arg(long, default_value = ".", help = "Any directory inside the repository")]
    root: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Do not fetch tags from the remote first")]
    no_fetch: bool,

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
    let repo = Git2Repository::open(&args.root)?;
    let root = repo.root().to_path_buf();
    ui::display_info(&format!("Working Directory: {:?}", root.display().to_string()));

    let config = config::load_config(args.config.as_deref(), &root)?;
    let today = chrono::Local::now().date_naive();

    ReleaseNotesGenerator::new(&root, &repo, &config.release_notes).generate(
        &args.tag,
        today,
        !args.no_fetch,
    )?;

    Ok(())
}
