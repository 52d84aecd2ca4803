use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use devscripts::config;
use devscripts::git::Git2Repository;
use devscripts::interrupt::{self, EXIT_FAILURE};
use devscripts::license::LicenseAuditor;
use devscripts::ui;

#[derive(clap::Parser)]
#[command(
    name = "check-license-disclaimer",
    about = "Report source files missing the license disclaimer at their top"
)]
struct Args {
    #[arg(long, default_value = ".", help = "Any directory inside the repository")]
    root: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

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
    let auditor = LicenseAuditor::new(&root, &config.license)?;
    let report = auditor.audit(&repo)?;

    println!();
    ui::display_info(&format!(
        "Missing license disclaimer in {}/{} recognized files.",
        report.missing.len(),
        report.recognized
    ));

    Ok(())
}
