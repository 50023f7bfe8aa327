//! rgblights CLI — drive the battery/notification light controller from a shell.
//!
//! Each subcommand builds one controller from the config file. `serve` keeps
//! that controller alive and reads requests from stdin until EOF.

use std::path::PathBuf;

use clap::Parser;

mod cli;

#[derive(Parser)]
#[command(
    name = "rgblights-cli",
    version,
    about = "Battery and notification light controller for sysfs RGB LEDs"
)]
struct Args {
    /// Path to the TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the LED class directory from the config
    #[arg(long, global = true)]
    sysfs_root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (every attribute write)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let opts = cli::GlobalOpts {
        config: args.config,
        sysfs_root: args.sysfs_root,
        json: args.json,
    };

    if let Err(e) = cli::run(args.command, &opts) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
