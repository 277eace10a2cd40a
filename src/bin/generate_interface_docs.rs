//! Generate interface documentation for every package in the install prefixes.
//!
//! Usage:
//!   generate-interface-docs
//!   generate-interface-docs --outputdir docs --packages-select std_msgs geometry_msgs
//!   generate-interface-docs --prefix /opt/ros/jazzy --prefix install

use anyhow::{Result, bail};
use clap::Parser;
use interface_docs::{
    DEFAULT_OUTPUT_DIR, GenerateOptions, generate, prefixes_from_env, split_list,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate-interface-docs", version)]
#[command(about = "Generate interfaces public API documentation")]
struct Cli {
    /// Output directory; pages are written under <DIR>/html.
    #[arg(
        long = "outputdir",
        visible_alias = "output-dir",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    output_dir: PathBuf,
    /// Generate the documentation for the following package names only.
    /// Given with no names, every package is documented.
    #[arg(long, num_args = 0.., value_name = "PKG")]
    packages_select: Vec<String>,
    /// Install prefix to scan (repeatable). Defaults to AMENT_PREFIX_PATH.
    #[arg(long = "prefix", value_name = "DIR")]
    prefixes: Vec<PathBuf>,
    /// Log every written page.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let prefixes = if cli.prefixes.is_empty() {
        prefixes_from_env()
    } else {
        cli.prefixes
    };
    let mut options = GenerateOptions::new(cli.output_dir, prefixes);
    options.packages = cli
        .packages_select
        .iter()
        .flat_map(|raw| split_list(raw))
        .collect();

    let report = generate(&options)?;
    if report.is_success() {
        return Ok(());
    }

    let failed: Vec<&str> = report
        .failures
        .iter()
        .map(|failure| failure.interface.as_str())
        .collect();
    bail!(
        "{} interface(s) failed; see log for details:\n{}",
        failed.len(),
        failed.join("\n")
    )
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}
